//! # Error Hierarchy
//!
//! Validation errors for request bodies, built with `thiserror`.
//! Each variant identifies the field and the rule it broke so the API
//! layer can surface a precise 422 message.

use thiserror::Error;

/// A request field violated one of its constraints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field is shorter than its minimum length.
    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        /// Field name as it appears in the request body.
        field: &'static str,
        /// Minimum accepted length, in characters.
        min: usize,
        /// Observed length, in characters.
        actual: usize,
    },

    /// The field is longer than its maximum length.
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        /// Field name as it appears in the request body.
        field: &'static str,
        /// Maximum accepted length, in characters.
        max: usize,
        /// Observed length, in characters.
        actual: usize,
    },

    /// The value is not a syntactically valid e-mail address.
    #[error("invalid email address: \"{value}\" ({reason})")]
    InvalidEmail {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TooShort { field, .. } | Self::TooLong { field, .. } => *field,
            Self::InvalidEmail { .. } => "email",
        }
    }
}
