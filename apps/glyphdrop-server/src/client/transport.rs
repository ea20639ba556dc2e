//! Transport between the controller and the extraction gateway

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::file::SelectedFile;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request to gateway failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gateway returned status {0}")]
    Status(u16),
}

/// Sends a staged file for extraction
#[async_trait]
pub trait ExtractionTransport: Send + Sync {
    /// Returns the `text` field of the gateway reply, if any
    async fn extract(&self, file: &SelectedFile) -> Result<Option<String>, TransportError>;
}

#[derive(Debug, Deserialize)]
struct GatewayReply {
    #[serde(default)]
    text: Option<String>,
}

/// Posts `multipart/form-data` to `<base_url>/api/ocr`
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/ocr", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExtractionTransport for HttpTransport {
    async fn extract(&self, file: &SelectedFile) -> Result<Option<String>, TransportError> {
        let mut part = Part::stream_with_length(file.bytes.clone(), file.len() as u64)
            .file_name(file.name.clone());
        if !file.mime_type.is_empty() {
            part = part.mime_str(&file.mime_type)?;
        }
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let reply: GatewayReply = response.json().await?;
        Ok(reply.text)
    }
}
