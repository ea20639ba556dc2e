//! OCR Providers
//!
//! Defines the provider trait and the Gemini implementation.

use async_trait::async_trait;
use base64::Engine;

use super::types::{GenerateContentRequest, GenerateContentResponse, ImageUpload, OcrError};
use crate::config::GeminiConfig;

/// OCR provider trait
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Extract text from an image.
    ///
    /// Returns the fallback string when the model answers without text.
    async fn recognize(&self, image: &ImageUpload) -> Result<String, OcrError>;
}

/// Gemini `generateContent` provider
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, OcrError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

#[async_trait]
impl OcrProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn recognize(&self, image: &ImageUpload) -> Result<String, OcrError> {
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        let request = GenerateContentRequest::for_image(&image.mime_type, image_base64);

        tracing::debug!(
            model = %self.config.model,
            mime_type = %image.mime_type,
            bytes = image.bytes.len(),
            "Calling Gemini generateContent"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .json(&request)
            .send()
            .await
            // The request URL carries the API key
            .map_err(|e| OcrError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OcrError::Transport(e.without_url()))?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let text = GenerateContentResponse::from_value(value).text_or_fallback();

        tracing::debug!(status = status.as_u16(), chars = text.len(), "Gemini responded");

        Ok(text)
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub response: Option<String>,
    pub calls: std::sync::atomic::AtomicUsize,
    pub last_mime_type: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: Default::default(),
            last_mime_type: Default::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Default::default(),
            last_mime_type: Default::default(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl OcrProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recognize(&self, image: &ImageUpload) -> Result<String, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_mime_type.lock().unwrap() = Some(image.mime_type.clone());
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(OcrError::UpstreamStatus {
                status: 503,
                body: "secret upstream detail".to_string(),
            }),
        }
    }
}
