//! Error types for the Glyphdrop server

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ocr::OcrError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No image uploaded")]
    NoImage,

    #[error("Request is not a multipart form: {0}")]
    InvalidForm(#[from] MultipartRejection),

    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::NoImage => (StatusCode::BAD_REQUEST, "No image uploaded"),
            AppError::InvalidForm(e) => {
                tracing::error!("Invalid form: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "OCR failed")
            }
            AppError::Multipart(e) => {
                tracing::error!("Multipart error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "OCR failed")
            }
            AppError::Ocr(e) => {
                tracing::error!("OCR error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "OCR failed")
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_no_image_is_bad_request() {
        let (status, body) = body_of(AppError::NoImage).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "No image uploaded" }));
    }

    #[tokio::test]
    async fn test_ocr_error_is_generic() {
        let error = AppError::Ocr(OcrError::UpstreamStatus {
            status: 403,
            body: "API key not valid: AIza-secret".to_string(),
        });
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "OCR failed" }));
    }
}
