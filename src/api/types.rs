//! API request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for one dialog turn.
///
/// Both fields deserialize as raw JSON so the validator, not serde, decides
/// which shapes are acceptable and can answer with a useful message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<Value>,
}

/// Reply for one dialog turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// RFC 3339 UTC time the reply was produced
    pub timestamp: String,
}

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_sessions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
