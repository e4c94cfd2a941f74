//! Request validation, ahead of any state access

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Longest session id the service accepts
pub const MAX_SESSION_ID_LENGTH: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("sessionId must be a non-empty string of at most 100 characters")]
    InvalidSessionId,
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTurn {
    pub session_id: String,
    pub message: String,
}

/// Check the raw request fields.
///
/// A missing session id is not an error: a fresh UUID is generated and
/// returned to the caller for subsequent turns. An empty message is
/// permitted (it routes to the fallback reply); a missing or non-string
/// one is not. Runs before any store access, so a failure has no side
/// effects.
pub fn validate_turn(
    session_id: Option<Value>,
    message: Option<Value>,
    max_message_len: usize,
) -> Result<ValidatedTurn, ValidationError> {
    let session_id = match session_id {
        None | Some(Value::Null) => Uuid::new_v4().to_string(),
        Some(Value::String(id)) => {
            if id.is_empty() || id.chars().count() > MAX_SESSION_ID_LENGTH {
                return Err(ValidationError::InvalidSessionId);
            }
            id
        }
        Some(_) => return Err(ValidationError::InvalidSessionId),
    };

    let message = match message {
        Some(Value::String(text)) => {
            if text.chars().count() > max_message_len {
                return Err(ValidationError::InvalidMessage(format!(
                    "message exceeds {max_message_len} characters"
                )));
            }
            text
        }
        None | Some(Value::Null) => {
            return Err(ValidationError::InvalidMessage(
                "message is required".to_string(),
            ))
        }
        Some(other) => {
            return Err(ValidationError::InvalidMessage(format!(
                "message must be a string, got {}",
                json_type_name(&other)
            )))
        }
    };

    Ok(ValidatedTurn { session_id, message })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
