//! Error types for document parsing.

use scenec_core::ValidationError;
use thiserror::Error;

/// Result type alias for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that abort parsing of a whole document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON has no recognizable document root.
    #[error("invalid document root: {0}")]
    InvalidRoot(String),

    /// One or more nodes are missing required fields or carry malformed values.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
