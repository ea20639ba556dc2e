//! Glyphdrop Server Library
//!
//! Image-to-text extraction backed by the Gemini `generateContent` API.
//! The server binary is in main.rs, the command-line client in
//! bin/glyphdrop.rs.
//!
//! # Modules
//!
//! - `client`: Upload session controller (selection, previews, progress)
//! - `ocr`: Gemini wire types and the OCR provider trait
//! - `routes`: HTTP surface (`/`, `/health`, `POST /api/ocr`)

pub mod client;
pub mod config;
pub mod error;
pub mod ocr;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;
