//! Error types for the Sheety client.

use thiserror::Error;

/// Result type for Sheety client operations.
pub type Result<T> = std::result::Result<T, SheetyError>;

/// Sheety client errors.
#[derive(Debug, Error)]
pub enum SheetyError {
    /// Network or body decoding error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Request body could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response did not contain the expected sheet key
    #[error("response has no `{0}` key")]
    MissingKey(String),
}
