use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    dtos::userdtos::Response, error::HttpError, middleware::JWTAuthMiddeware, AppState,
};

pub fn notifications_handler() -> Router {
    Router::new()
        .route("/", get(get_notifications))
        .route("/:notification_id/read", put(mark_notification_read))
}

pub async fn get_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .notification_service
        .get_user_notifications(user.user.id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": notifications.len(),
        "data": notifications,
    })))
}

/// Scoped to the caller; marking someone else's notification is a no-op
/// that still reports success.
pub async fn mark_notification_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .notification_service
        .mark_notification_read(notification_id, user.user.id)
        .await?;

    Ok(Json(Response {
        status: "success",
        message: "Notification marked as read".to_string(),
    }))
}
