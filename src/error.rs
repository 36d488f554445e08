//! Error Types
//!
//! Every failure ends at the screen that caused it; nothing is retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; the message is the backend's text, verbatim
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Blocked before sending
    #[error("{0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// A mutation either failed itself or succeeded and the refetch failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationFailure {
    #[error("{0}")]
    Rejected(ApiError),

    #[error("Saved, but reloading the list failed: {0}")]
    RefreshFailed(ApiError),
}

/// Pull a human message out of an error body: JSON `message`/`error`, else raw text
pub fn message_from_body(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    if trimmed.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        trimmed.to_string()
    }
}
