//! Cover extraction endpoint
//!
//! Accepts one cover image as multipart form data and returns the
//! extracted bibliographic fields.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::extract::BookFields;
use crate::state::AppState;

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(extract_cover))
        // Covers are photos, not scans; 10MB is plenty
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}

/// Extract book details from an uploaded cover image
async fn extract_cover(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BookFields>> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read upload: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        let filename = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());

        tracing::debug!(
            "Received field: name='{}', filename={:?}, content_type={:?}",
            name,
            filename,
            content_type
        );

        if name == "image" {
            // Browsers set the part's content type from the picked file
            let mime_type = content_type.unwrap_or_else(|| "image/jpeg".to_string());

            let data = field.bytes().await.map_err(|e| {
                tracing::error!("Failed to read image data: {}", e);
                AppError::BadRequest(format!("Failed to read image data: {}", e))
            })?;

            tracing::debug!("Read {} bytes of image data", data.len());

            let fields = state.extractor().extract(&data, &mime_type).await?;
            return Ok(Json(fields));
        }
    }

    tracing::warn!("No image field found in multipart upload");
    Err(AppError::BadRequest("No image file found".to_string()))
}
