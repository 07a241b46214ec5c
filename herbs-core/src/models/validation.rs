//! Validation error types

use thiserror::Error;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty or whitespace-only when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field is shorter than its minimum length
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooShort { field, .. } | Self::TooLong { field, .. } => {
                *field
            }
        }
    }
}
