//! OCR Routes
//!
//! Endpoints:
//! - POST /api/ocr - Extract text from the uploaded `image` field

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::ocr::ImageUpload;
use crate::state::AppState;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Successful extraction response
#[derive(Debug, Serialize, Deserialize)]
pub struct OcrResponse {
    pub text: String,
}

/// Create the OCR router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/ocr", post(extract_text))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /api/ocr
///
/// Forwards the `image` field to the OCR provider and returns its text.
async fn extract_text(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrResponse>> {
    let mut multipart = multipart?;
    let image = read_image_field(&mut multipart)
        .await?
        .ok_or(AppError::NoImage)?;

    tracing::info!(
        provider = state.provider().name(),
        file_name = ?image.file_name,
        mime_type = %image.mime_type,
        bytes = image.bytes.len(),
        "Extracting text from upload"
    );

    let text = state.provider().recognize(&image).await?;

    Ok(Json(OcrResponse { text }))
}

/// Read the first `image` field, skipping any others
async fn read_image_field(multipart: &mut Multipart) -> Result<Option<ImageUpload>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let mime_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .map(|ct| ct.to_string())
            .or_else(|| {
                file_name
                    .as_deref()
                    .and_then(|name| mime_guess::from_path(name).first_raw())
                    .map(|ct| ct.to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let bytes = field.bytes().await?;

        return Ok(Some(ImageUpload {
            bytes: bytes.to_vec(),
            mime_type,
            file_name,
        }));
    }

    Ok(None)
}
