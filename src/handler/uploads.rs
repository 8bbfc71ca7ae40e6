use std::sync::Arc;

use axum::{
    extract::Multipart, response::IntoResponse, routing::post, Extension, Json, Router,
};
use base64::Engine;

use crate::{error::HttpError, AppState};

pub fn uploads_handler() -> Router {
    Router::new().route("/", post(upload_file))
}

/// Pass-through transcoder: nothing is persisted, the file comes back
/// base64-encoded for the client to embed as an attachment reference.
pub async fn upload_file(
    Extension(_app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(|name| name.to_string());
        let content_type = field.content_type().map(|mime| mime.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;

        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);

        return Ok(Json(serde_json::json!({
            "filename": filename,
            "content_type": content_type,
            "data": data,
        })));
    }

    Err(HttpError::bad_request("No file provided"))
}
