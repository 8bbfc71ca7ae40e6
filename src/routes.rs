use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        admin::admin_handler,
        auth::auth_handler,
        bids::bids_handler,
        chat::{chat_handler, moderation_handler},
        notifications::notifications_handler,
        payments::{admin_payments_handler, payments_handler},
        prices::{admin_prices_handler, prices_handler},
        requests::requests_handler,
        uploads::uploads_handler,
    },
    middleware::auth,
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .nest("/payments", admin_payments_handler())
        .nest("/messages", moderation_handler())
        .nest("/prices", admin_prices_handler())
        .merge(admin_handler())
        .layer(middleware::from_fn(auth));

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/requests", requests_handler().layer(middleware::from_fn(auth)))
        .nest("/bids", bids_handler().layer(middleware::from_fn(auth)))
        .nest("/payments", payments_handler().layer(middleware::from_fn(auth)))
        .nest("/prices", prices_handler().layer(middleware::from_fn(auth)))
        .nest("/chat", chat_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/notifications",
            notifications_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/upload", uploads_handler().layer(middleware::from_fn(auth)))
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Server is running"
    }))
}
