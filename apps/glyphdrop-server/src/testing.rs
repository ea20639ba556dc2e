//! Test helpers: a local stand-in for the Gemini API

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tokio::sync::Mutex;

/// A request received by the fake upstream
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub model_path: String,
    pub key: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    response: serde_json::Value,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Serves a fixed response on `/v1beta/models/:model_path`
pub struct FakeGemini {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeGemini {
    pub async fn start(status: u16, response: serde_json::Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status: StatusCode::from_u16(status).unwrap(),
            response,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1beta/models/:model_path", post(generate_content))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn generate_content(
    State(state): State<FakeState>,
    Path(model_path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.requests.lock().await.push(CapturedRequest {
        model_path,
        key: query.get("key").cloned(),
        body,
    });
    (state.status, Json(state.response.clone()))
}
