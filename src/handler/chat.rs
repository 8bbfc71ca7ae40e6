use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, requestdb::RequestExt},
    dtos::{chatdtos::SendMessageDto, userdtos::Response},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::workflow,
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/send", post(send_message))
        .route("/:request_id", get(get_chat_messages))
}

/// Moderation queue, mounted under the admin tree.
pub fn moderation_handler() -> Router {
    Router::new()
        .route("/pending", get(get_pending_messages))
        .route("/:message_id/approve", put(approve_message))
        .route("/:message_id", delete(delete_message))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
}

/// Messages land unapproved and wait for moderation; only the admin queue
/// notification goes out at this point, not one to the receiver.
pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .db_client
        .get_request(body.request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    workflow::ensure_chat_open(&request)?;
    workflow::chat_participant(&request, &user.user)?;

    let message = app_state
        .db_client
        .save_message(body.request_id, user.user.id, body.receiver_id, &body.message)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .notification_service
        .notify_message_needs_approval(&user.user.name, &request.title)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": message,
    })))
}

/// Participants read the approved conversation; admins also see messages
/// still sitting in the moderation queue.
pub async fn get_chat_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    workflow::chat_participant(&request, &user.user)?;

    let approved_only = user.user.role != UserRole::Admin;
    let messages = app_state
        .db_client
        .get_messages_for_request(request_id, approved_only)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": messages.len(),
        "data": messages,
    })))
}

pub async fn get_pending_messages(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_pending_messages()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": messages.len(),
        "data": messages,
    })))
}

pub async fn approve_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let message = app_state
        .db_client
        .approve_message(message_id, user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Message not found"))?;

    let _ = app_state
        .notification_service
        .notify_message_approved(message.receiver_id)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Message approved successfully",
        "data": message,
    })))
}

pub async fn delete_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_message(message_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Message not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Message deleted successfully".to_string(),
    }))
}
