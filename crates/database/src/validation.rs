//! Input validation for chat message fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for chat ids.
pub const MAX_CHAT_ID_LENGTH: usize = 64;

/// Maximum allowed length for message text.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Validate a chat id (e.g., "34600000000@c.us").
pub fn validate_chat_id(chat_id: &str) -> Result<(), ValidationError> {
    validate_required("chat_id", chat_id, MAX_CHAT_ID_LENGTH)
}

/// Validate message text.
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    validate_required("message", message, MAX_MESSAGE_LENGTH)
}

/// Lengths are counted in characters, not bytes.
fn validate_required(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }

    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }

    Ok(())
}
