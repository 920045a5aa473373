// crates/network/src/error.rs
//! Error types for network operations

use animeradar_core::ErrorInfo;
use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network operations
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not the JSON we asked for
    #[error("Invalid response body from {url}: {message}")]
    Decode { url: String, message: String },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name or value rejected by the HTTP stack
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl NetworkError {
    /// Returns true if the request ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetworkError::Http(e) if e.is_timeout())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            NetworkError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Classifies a transport failure into the shared taxonomy
///
/// Timeouts become `TIMEOUT`, a 404 becomes `NOT_FOUND`, everything else
/// (other statuses, connect failures, garbage bodies, bad input) becomes
/// `SERVICE_ERROR`. The original error text is kept in the message for logs.
impl From<NetworkError> for ErrorInfo {
    fn from(error: NetworkError) -> Self {
        if error.is_timeout() {
            ErrorInfo::timeout(error.to_string())
        } else if error.status() == Some(404) {
            ErrorInfo::not_found(error.to_string())
        } else {
            ErrorInfo::service(error.to_string())
        }
    }
}
