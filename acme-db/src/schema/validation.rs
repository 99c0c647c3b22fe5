//! Validation error types

use std::fmt;

/// Input rejected before it reaches the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or whitespace only)
    Empty { field: &'static str },

    /// Field exceeds maximum length in characters
    TooLong { field: &'static str, max: usize },

    /// String doesn't match the required format (e.g. UUID)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Payload doesn't have the declared shape (missing/unknown fields, wrong types)
    Malformed { reason: String },
}

impl ValidationError {
    /// Wrap a serde error raised while decoding procedure input.
    pub fn malformed(err: impl fmt::Display) -> Self {
        Self::Malformed {
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { reason } => write!(f, "invalid input: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
