//! OCR Types
//!
//! Wire types for the Gemini `generateContent` API plus the upload and
//! error types shared by the providers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Instruction sent alongside every image
pub const EXTRACTION_PROMPT: &str = "Extract all visible text from this image.";

/// Text returned when the model response carries no usable text
pub const FALLBACK_TEXT: &str = "No text found.";

/// An uploaded image awaiting extraction
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request: the extraction prompt followed by the inline image
    pub fn for_image(mime_type: &str, base64_data: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::text(EXTRACTION_PROMPT),
                    Part::inline_data(mime_type, base64_data),
                ],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }
}

/// Inline base64 payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Response body of `generateContent`.
///
/// Every level is optional and a level of the wrong JSON type reads as
/// absent, so only `candidates[0].content.parts[0].text` decides the result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub candidates: Vec<Option<Candidate>>,
}

impl GenerateContentResponse {
    /// Read a response from any JSON value; non-objects carry no candidates
    pub fn from_value(value: serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }

    /// `candidates[0].content.parts[0].text`, ignoring empty strings
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .as_ref()?
            .content
            .as_ref()?
            .parts
            .first()?
            .as_ref()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// The first text part or the fallback string
    pub fn text_or_fallback(&self) -> String {
        self.first_text().unwrap_or(FALLBACK_TEXT).to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub parts: Vec<Option<ResponsePart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

/// Keep the value only when it has the expected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Array elements of the wrong shape become `None`; a non-array is empty
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.into_iter().map(|item| T::deserialize(item).ok()).collect(),
        _ => Vec::new(),
    })
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Failed to call upstream model: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Failed to parse upstream response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        GenerateContentResponse::from_value(value)
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::for_image("image/png", "QUJD".to_string());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "text": "Extract all visible text from this image." },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_first_text_present() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "HELLO" }] } }]
        }));
        assert_eq!(response.text_or_fallback(), "HELLO");
    }

    #[test]
    fn test_fallback_at_every_missing_level() {
        let bodies = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": null }),
            json!({ "candidates": [{ "content": null }] }),
            json!({ "candidates": [{ "content": { "parts": null } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": null }] } }] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
            json!({ "candidates": [null] }),
            json!({ "candidates": [{ "content": { "parts": [null] } }] }),
            json!({ "candidates": {} }),
            json!({ "candidates": "none" }),
            json!({ "candidates": [{ "content": "text" }] }),
            json!({ "candidates": [{ "content": { "parts": { "text": "HELLO" } } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] }),
            json!([]),
            json!([[{ "content": { "parts": [{ "text": "HELLO" }] } }]]),
            json!("HELLO"),
            serde_json::Value::Null,
        ];

        for body in bodies {
            assert_eq!(parse(body.clone()).text_or_fallback(), FALLBACK_TEXT, "body: {}", body);
        }
    }

    #[test]
    fn test_malformed_later_candidate_keeps_first() {
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "HELLO" }, null] } },
                null,
                "garbage"
            ]
        }));
        assert_eq!(response.first_text(), Some("HELLO"));
    }

    #[test]
    fn test_only_first_part_consulted() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "" } },
                { "text": "second" }
            ] } }]
        }));
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let response = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "abc" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12 }
        }));
        assert_eq!(response.first_text(), Some("abc"));
    }
}
