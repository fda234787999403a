//! LibreNMS client errors

use thiserror::Error;

/// Errors that can occur when interacting with the LibreNMS API
#[derive(Debug, Error)]
pub enum LibreNmsError {
    /// HTTP request/response error (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// LibreNMS API returned a non-success status
    #[error("LibreNMS API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, or the raw body
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid or missing token)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found (404, missing envelope field, or empty collection)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response envelope did not have the expected JSON type
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid request (e.g., empty hostname)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LibreNmsError {
    /// Whether this error means the requested resource does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
