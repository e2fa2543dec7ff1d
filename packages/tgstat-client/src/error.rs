//! Error types for the TGStat client.

use thiserror::Error;

/// Result type for TGStat client operations.
pub type Result<T> = std::result::Result<T, TgStatError>;

/// TGStat client errors.
#[derive(Debug, Error)]
pub enum TgStatError {
    /// Network or body decoding error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response carrying `"status": "error"`
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Envelope without a `response` payload
    #[error("response payload missing")]
    MissingPayload,
}
