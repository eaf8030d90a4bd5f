//! Error types for brokkr-core

use thiserror::Error;

/// Result type alias using brokkr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Option-resolution error types
#[derive(Error, Debug)]
pub enum Error {
    /// A required answer was empty or missing
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Unknown template identifier
    #[error("Unknown template: {template}. Available templates: {available}")]
    UnknownTemplate { template: String, available: String },

    /// IO error surfaced by a prompt backend
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unknown template error
    pub fn unknown_template(template: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownTemplate {
            template: template.into(),
            available: available.into(),
        }
    }
}
