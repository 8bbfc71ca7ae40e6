use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{pricedb::PriceExt, requestdb::RequestExt},
    dtos::{paymentdtos::CreatePriceDto, userdtos::Response},
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn prices_handler() -> Router {
    Router::new().route("/request/:request_id", get(get_request_prices))
}

pub fn admin_prices_handler() -> Router {
    Router::new()
        .route("/", post(set_admin_price).get(get_admin_prices))
        .route("/:price_id", delete(delete_admin_price))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
}

pub async fn set_admin_price(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePriceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .db_client
        .get_request(body.request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let price = app_state
        .db_client
        .save_price(body.request_id, body.price, user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .notification_service
        .notify_admin_price(request.student_id, price.price, &request.title)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": price,
    })))
}

pub async fn get_admin_prices(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let prices = app_state
        .db_client
        .get_all_prices()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": prices.len(),
        "data": prices,
    })))
}

/// Student-visible quotes for one request. The owning student, any
/// supervisor and admins may look; other students are turned away.
pub async fn get_request_prices(
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

    if user.user.role == UserRole::Student && request.student_id != user.user.id {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    let prices = app_state
        .db_client
        .get_prices_for_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": prices.len(),
        "data": prices,
    })))
}

pub async fn delete_admin_price(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(price_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_price(price_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Price not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Price deleted successfully".to_string(),
    }))
}
