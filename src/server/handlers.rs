//! HTTP handlers for the document processing API.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ProcessingResult;

use super::AppState;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Service metadata and engine readiness.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Immigration Document OCR API",
        "status": "online",
        "tesseract_available": state.pipeline.engine_available(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Process an uploaded document image.
///
/// Expects multipart form data with a required `document` file field
/// and an optional `username` text field (pass-through, logged only).
/// Pipeline outcomes - including `success = false` ones - reply 200;
/// only transport problems (missing file, non-image payload) reply 4xx.
pub async fn process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut document: Option<Vec<u8>> = None;
    let mut username: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Malformed multipart request: {}", e)),
        };

        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("document") => match field.bytes().await {
                Ok(bytes) => document = Some(bytes.to_vec()),
                Err(e) => {
                    return bad_request(format!("Failed to read document field: {}", e));
                }
            },
            Some("username") => {
                username = field.text().await.ok().filter(|s| !s.is_empty());
            }
            _ => {
                // Drain and ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let Some(bytes) = document else {
        return bad_request("Missing 'document' file field".to_string());
    };

    // Sniff content, not filename; the pipeline only handles raster images
    let is_image = infer::get(&bytes)
        .map(|kind| kind.mime_type().starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return bad_request("Uploaded file is not a supported image".to_string());
    }

    if let Some(ref username) = username {
        tracing::info!(username = %username, size = bytes.len(), "processing upload");
    }

    // The OCR subprocess can take a while; keep it off the async runtime
    let pipeline = state.pipeline.clone();
    let result = match tokio::task::spawn_blocking(move || pipeline.process_bytes(&bytes)).await {
        Ok(result) => result,
        Err(e) => ProcessingResult::failure(format!("Processing error: {}", e)),
    };

    Json(result).into_response()
}

fn bad_request(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "error": error,
        })),
    )
        .into_response()
}
