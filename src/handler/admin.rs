use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{settingsdb::SettingsExt, userdb::UserExt},
    dtos::{
        settingsdtos::UpdateSettingsDto,
        userdtos::{AdminUpdateUserDto, RegisterUserDto, Response, UserListQueryDto},
    },
    error::{ErrorMessage, HttpError},
    middleware::role_check,
    models::usermodel::UserRole,
    utils::password,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/users", get(get_all_users).post(create_user))
        .route("/users/:user_id", put(update_user).delete(delete_user))
        .route("/supervisors", get(get_all_supervisors))
        .route(
            "/system-settings",
            get(get_system_settings).put(update_system_settings),
        )
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
}

pub async fn get_all_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<UserListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let users = app_state
        .db_client
        .get_users(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": users.len(),
        "users": users,
    })))
}

pub async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(body.email, body.name, hashed_password, body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": user,
    })))
}

/// Full-record update from the admin panel. An absent or empty password
/// keeps the stored hash.
pub async fn update_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<AdminUpdateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let password_hash = match body.password.as_deref() {
        Some(password) if !password.is_empty() => {
            password::hash(password).map_err(|e| HttpError::server_error(e.to_string()))?
        }
        _ => existing.password_hash.clone(),
    };

    let updated = app_state
        .db_client
        .update_user(user_id, body.email, body.name, password_hash, body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated,
    })))
}

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("User not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "User deleted successfully".to_string(),
    }))
}

pub async fn get_all_supervisors(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let supervisors = app_state
        .db_client
        .get_users_by_role(UserRole::Supervisor)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": supervisors.len(),
        "data": supervisors,
    })))
}

pub async fn get_system_settings(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let settings = app_state
        .db_client
        .get_settings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": settings,
    })))
}

pub async fn update_system_settings(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateSettingsDto>,
) -> Result<impl IntoResponse, HttpError> {
    let settings = app_state
        .db_client
        .update_settings(
            body.site_title.as_deref(),
            body.login_title.as_deref(),
            body.site_description.as_deref(),
            body.header_color.as_deref(),
            body.meta_keywords.as_deref(),
            body.system_language.as_deref(),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": settings,
    })))
}
