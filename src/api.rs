//! Server API Wrappers
//!
//! Frontend bindings to the to-do server's JSON endpoints.

use std::fmt;

use crate::models::{AddTaskArgs, AddTaskResponse, ToDoItem};

/// Failures that happen before a receipt can be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request could not be sent or the body could not be read
    Transport(String),
    /// Body was not a receipt we understand
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Absolute URL for a server path.
///
/// reqwest on wasm32 only accepts absolute URLs, so the page origin is prefixed.
fn endpoint(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}{}", origin, path)
}

/// Decode the body of `POST /api/add`
pub fn decode_receipt(body: &str) -> Result<AddTaskResponse, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// ========================
// Task Endpoints
// ========================

/// `POST /api/add` with `{"content": ...}`.
///
/// Error statuses are not treated specially: their bodies carry a non-success
/// marker and decode to `AddTaskResponse::Rejected`.
pub async fn add_task(content: &str) -> Result<AddTaskResponse, ApiError> {
    let body = reqwest::Client::new()
        .post(endpoint("/api/add"))
        .json(&AddTaskArgs { content })
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    decode_receipt(&body)
}

/// `GET /api/tasks`
pub async fn list_tasks() -> Result<Vec<ToDoItem>, ApiError> {
    let response = reqwest::Client::new()
        .get(endpoint("/api/tasks"))
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    response
        .json::<Vec<ToDoItem>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
