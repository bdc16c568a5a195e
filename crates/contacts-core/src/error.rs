//! Error types for the contacts front end
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type alias for contacts operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the contacts front end
#[derive(Error, Debug)]
pub enum Error {
    /// Local form validation failed; never sent to the notifier
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The backend answered with a status outside the operation's success set
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Network unreachable or malformed response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Record not found in the local contact sequence
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the current dialog state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors (config files, terminal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a rejection error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of a backend rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user in a failure notification
    ///
    /// Rejections and transport failures are surfaced verbatim, without the
    /// variant prefix used by `Display`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
