//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error type for API handlers.
///
/// Per-symbol fetch failures never surface here — they are absorbed by the
/// pipeline's skip logic, and a fully failed fetch is still a `200 OK` with
/// an empty object. This covers only infrastructure failures such as a
/// panicked worker task.
#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}
