//! Error types for Candor.

use thiserror::Error;

use crate::submission::ValidationErrors;

/// Errors raised inside the core.
///
/// The moderation and rewrite adapters use this internally and degrade to
/// their safe result shapes at their public boundary.
#[derive(Debug, Error)]
pub enum CandorError {
    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered with an unusable body.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Caller input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Result type for Candor operations.
pub type Result<T> = std::result::Result<T, CandorError>;
