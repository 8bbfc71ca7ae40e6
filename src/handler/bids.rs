use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{biddb::BidExt, requestdb::RequestExt},
    dtos::biddtos::{BidStatusQueryDto, CreateBidDto},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{bidmodel::BidStatus, usermodel::UserRole},
    service::workflow::{self, RequestEvent},
    AppState,
};

pub fn bids_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(create_bid).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Supervisor])
            })),
        )
        .route(
            "/",
            get(get_bids).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Supervisor, UserRole::Admin])
            })),
        )
        .route(
            "/request/:request_id",
            get(get_bids_for_request).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:bid_id/status",
            put(update_bid_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn create_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateBidDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .db_client
        .get_request(body.request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let request = workflow::ensure_biddable(request.as_ref())?;

    let bid = app_state
        .db_client
        .save_bid(
            user.user.id,
            body.request_id,
            body.price,
            body.estimated_completion,
            &body.proposal,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .notification_service
        .notify_bid_submitted(&user.user.name, &request.title)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": bid,
    })))
}

/// Supervisors see their own bids, admins every bid in the system.
pub async fn get_bids(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = match user.user.role {
        UserRole::Supervisor => app_state
            .db_client
            .get_bids_by_supervisor(user.user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        _ => app_state
            .db_client
            .get_all_bids()
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": bids.len(),
        "data": bids,
    })))
}

pub async fn get_bids_for_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = app_state
        .db_client
        .get_bids_for_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": bids.len(),
        "data": bids,
    })))
}

/// Accepting a bid is the cascade case: the winner flips to accepted, every
/// sibling bid is rejected and the request moves to accepted with the bidder
/// as its supervisor, atomically. Any other status is a plain one-row update.
pub async fn update_bid_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bid_id): Path<Uuid>,
    Query(query): Query<BidStatusQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let status = BidStatus::from_str(&query.status_value)
        .ok_or_else(|| HttpError::bad_request("Invalid status"))?;

    let bid = app_state
        .db_client
        .get_bid(bid_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Bid not found"))?;

    let updated = match status {
        BidStatus::Accepted => {
            let request = app_state
                .db_client
                .get_request(bid.request_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or_else(|| HttpError::not_found("Request not found"))?;

            let next = workflow::transition(
                &request,
                RequestEvent::AcceptBid {
                    supervisor_id: bid.supervisor_id,
                },
            )?;

            app_state
                .db_client
                .accept_bid(bid_id, request.id, next.status, next.assigned_supervisor)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
        }
        _ => app_state
            .db_client
            .set_bid_status(bid_id, status)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    let _ = app_state
        .notification_service
        .notify_bid_status(bid.supervisor_id, status.to_str())
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Bid status updated successfully",
        "data": updated,
    })))
}
