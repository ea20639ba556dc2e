//! Single-page upload UI
//!
//! The page is compiled into the binary; it talks to `POST /api/ocr`.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
