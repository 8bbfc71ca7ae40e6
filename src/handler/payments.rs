use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{paymentdb::PaymentExt, requestdb::RequestExt},
    dtos::{
        paymentdtos::{CreatePaymentDto, UpdatePaymentDto},
        userdtos::Response,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::{paymentmodel::PaymentInfo, usermodel::UserRole},
    service::workflow::{self, RequestEvent},
    AppState,
};

/// Read-side routes. Students can only see payment records addressed to
/// them; admins see everything.
pub fn payments_handler() -> Router {
    Router::new()
        .route("/request/:request_id", get(get_payment_by_request))
        .route("/student/:student_id", get(get_payments_by_student))
        .route("/bid/:bid_id", get(get_payment_by_bid))
}

/// Admin-side payment management, mounted under the admin tree.
pub fn admin_payments_handler() -> Router {
    Router::new()
        .route("/", post(create_payment_info))
        .route("/:payment_id/approve", put(approve_payment))
        .route("/:payment_id", put(update_payment_info))
        .route("/:payment_id", delete(delete_payment_info))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
}

fn ensure_payment_visible(payment: &PaymentInfo, user: &JWTAuthMiddeware) -> Result<(), HttpError> {
    if user.user.role == UserRole::Admin || payment.student_id == user.user.id {
        Ok(())
    } else {
        Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ))
    }
}

pub async fn get_payment_by_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment_by_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment information not found"))?;

    ensure_payment_visible(&payment, &user)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": payment,
    })))
}

pub async fn get_payments_by_student(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(student_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if user.user.role != UserRole::Admin && student_id != user.user.id {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied.to_string(),
            StatusCode::FORBIDDEN,
        ));
    }

    let payments = app_state
        .db_client
        .get_payments_by_student(student_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": payments.len(),
        "data": payments,
    })))
}

pub async fn get_payment_by_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(bid_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment_by_bid(&bid_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment information not found"))?;

    ensure_payment_visible(&payment, &user)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": payment,
    })))
}

pub async fn create_payment_info(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .db_client
        .get_request(body.request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let existing = app_state
        .db_client
        .get_payment_by_request(body.request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request(
            "Payment information already exists for this request",
        ));
    }

    let payment = app_state
        .db_client
        .save_payment(
            body.student_id,
            body.request_id,
            body.bid_id,
            &body.payment_method,
            &body.payment_details,
            body.instructions,
            user.user.id,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .notification_service
        .notify_payment_info(payment.student_id, &request.title)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": payment,
    })))
}

pub async fn approve_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment information not found"))?;

    let request = app_state
        .db_client
        .get_request(payment.request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let next = workflow::transition(
        &request,
        RequestEvent::ApprovePayment {
            admin_id: user.user.id,
        },
    )?;

    let approved = app_state
        .db_client
        .approve_payment(
            payment_id,
            user.user.id,
            request.id,
            next.status,
            next.assigned_supervisor,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .notification_service
        .notify_payment_approved(approved.student_id, &request.title)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Payment approved successfully",
        "data": approved,
    })))
}

pub async fn update_payment_info(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(payment_id): Path<Uuid>,
    Json(body): Json<UpdatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .db_client
        .update_payment(
            payment_id,
            body.bid_id,
            &body.payment_method,
            &body.payment_details,
            body.instructions,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment information not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated,
    })))
}

pub async fn delete_payment_info(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Payment information not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Payment information deleted successfully".to_string(),
    }))
}
