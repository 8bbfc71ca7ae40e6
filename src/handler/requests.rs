use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{requestdb::RequestExt, userdb::UserExt},
    dtos::{
        requestdtos::{AssignQueryDto, CreateRequestDto, RequestListQueryDto},
        userdtos::Response,
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{requestmodel::RequestStatus, usermodel::UserRole},
    service::workflow::{self, RequestEvent},
    AppState,
};

pub fn requests_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(create_essay_request).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Student])
            })),
        )
        .route("/", get(get_essay_requests))
        .route("/assigned", get(get_assigned_requests))
        .route("/:request_id", get(get_essay_request).put(update_essay_request))
        .route(
            "/:request_id",
            delete(delete_essay_request).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:request_id/assign",
            put(assign_request_to_supervisor).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:request_id/complete",
            put(complete_essay_request).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:request_id/reject",
            put(reject_essay_request).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn create_essay_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .db_client
        .save_request(
            user.user.id,
            &body.title,
            body.due_date,
            body.word_count,
            &body.assignment_type,
            &body.field_of_study,
            body.attachments,
            body.extra_information,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .notification_service
        .notify_new_request(&request.title)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": request,
    })))
}

/// Students see their own requests, supervisors the pending pool and admins
/// everything. Search and category narrow whichever set applies.
pub async fn get_essay_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Query(query): Query<RequestListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (student_id, status) = match user.user.role {
        UserRole::Student => (Some(user.user.id), None),
        UserRole::Supervisor => (None, Some(RequestStatus::Pending)),
        UserRole::Admin => (None, None),
    };

    let requests = app_state
        .db_client
        .get_requests(
            student_id,
            status,
            query.search.as_deref(),
            query.category.as_deref(),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": requests.len(),
        "data": requests,
    })))
}

pub async fn get_assigned_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let (student_id, supervisor_id) = match user.user.role {
        UserRole::Student => (Some(user.user.id), None),
        UserRole::Supervisor => (None, Some(user.user.id)),
        UserRole::Admin => (None, None),
    };

    let requests = app_state
        .db_client
        .get_assigned_requests(student_id, supervisor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": requests.len(),
        "data": requests,
    })))
}

pub async fn get_essay_request(
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

    workflow::view_request(&request, &user.user)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": request,
    })))
}

pub async fn update_essay_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<CreateRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .db_client
        .get_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    workflow::edit_request(&request, &user.user)?;

    let updated = app_state
        .db_client
        .update_request(
            request_id,
            &body.title,
            body.due_date,
            body.word_count,
            &body.assignment_type,
            &body.field_of_study,
            body.attachments,
            body.extra_information,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated,
    })))
}

pub async fn delete_essay_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_request_cascade(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Request not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Request and all associated data deleted successfully".to_string(),
    }))
}

pub async fn assign_request_to_supervisor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<Uuid>,
    Query(query): Query<AssignQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let supervisor = app_state
        .db_client
        .get_user(Some(query.supervisor_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|user| user.role == UserRole::Supervisor)
        .ok_or_else(|| HttpError::not_found("Supervisor not found"))?;

    let request = app_state
        .db_client
        .get_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let next = workflow::transition(
        &request,
        RequestEvent::Assign {
            supervisor_id: supervisor.id,
        },
    )?;

    let updated = app_state
        .db_client
        .apply_transition(request_id, next.status, next.assigned_supervisor)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let _ = app_state
        .notification_service
        .notify_assignment(supervisor.id)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Request assigned successfully",
        "data": updated,
    })))
}

pub async fn complete_essay_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let next = workflow::transition(&request, RequestEvent::Complete)?;

    let updated = app_state
        .db_client
        .apply_transition(request_id, next.status, next.assigned_supervisor)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated,
    })))
}

pub async fn reject_essay_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let next = workflow::transition(&request, RequestEvent::Reject)?;

    let updated = app_state
        .db_client
        .apply_transition(request_id, next.status, next.assigned_supervisor)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated,
    })))
}
