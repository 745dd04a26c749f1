//! Client error types

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network request failed or the body could not be decoded
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// 2xx response whose envelope was not usable
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl ClientError {
    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::HttpStatus { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
