//! # Validation Errors
//!
//! Errors raised before any store call. The `Display` text is what the
//! API returns to clients, so it stays short and stable.

use thiserror::Error;

/// A decoded payload or path parameter failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The path identifier is not a UUID.
    #[error("malformed id: {0}")]
    MalformedId(String),

    /// The `Type` field is empty or outside the closed enumeration.
    #[error("invalid company type")]
    InvalidCompanyType {
        /// The rejected raw value, kept for logging.
        value: String,
    },
}
