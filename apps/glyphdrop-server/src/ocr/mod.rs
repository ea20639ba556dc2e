//! OCR Module
//!
//! Text extraction is delegated to a multimodal model. The image is sent
//! inline (base64) together with a fixed instruction and the first text
//! part of the answer is returned.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glyphdrop_server::config::GeminiConfig;
//! use glyphdrop_server::ocr::{GeminiProvider, ImageUpload, OcrProvider};
//!
//! let provider = GeminiProvider::new(GeminiConfig::with_key(api_key))?;
//! let text = provider.recognize(&ImageUpload {
//!     bytes,
//!     mime_type: "image/png".to_string(),
//!     file_name: None,
//! }).await?;
//! ```

mod provider;
mod types;

pub use provider::{GeminiProvider, OcrProvider};
pub use types::{
    Blob, Candidate, CandidateContent, Content, GenerateContentRequest, GenerateContentResponse, ImageUpload,
    OcrError, Part, ResponsePart, EXTRACTION_PROMPT, FALLBACK_TEXT,
};

#[cfg(test)]
pub use provider::MockProvider;
