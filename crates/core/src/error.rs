//! Error taxonomy for the streaming resolution layer
//!
//! Every failure that leaves a provider adapter, the source validator or the
//! provider manager is expressed as an [`ErrorInfo`] carrying one of the five
//! [`ErrorKind`]s below. The set is closed: callers can match on it
//! exhaustively and render a distinct message for each kind.
//!
//! | Kind | Status | Retryable |
//! |---|---|---|
//! | `NOT_FOUND` | 404 | no |
//! | `TIMEOUT` | 504 | yes |
//! | `SERVICE_ERROR` | 503 | yes |
//! | `INVALID_SOURCES` | 404 | no |
//! | `PROVIDERS_UNAVAILABLE` | 503 | no |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type used across the resolution layer
pub type Result<T> = std::result::Result<T, ErrorInfo>;

/// Closed set of error classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Upstream confirms the resource does not exist
    NotFound,
    /// Request exceeded its time budget
    Timeout,
    /// Upstream reachable but returned an error or garbage
    ServiceError,
    /// Sources were returned but none passed validation
    InvalidSources,
    /// Every configured provider was exhausted
    ProvidersUnavailable,
}

impl ErrorKind {
    /// HTTP-like status code for this kind
    pub fn status(self) -> u16 {
        match self {
            Self::NotFound | Self::InvalidSources => 404,
            Self::Timeout => 504,
            Self::ServiceError | Self::ProvidersUnavailable => 503,
        }
    }

    /// Whether an operation failing with this kind is worth another attempt
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout | Self::ServiceError)
    }

    /// Wire code, e.g. `PROVIDERS_UNAVAILABLE`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Timeout => "TIMEOUT",
            Self::ServiceError => "SERVICE_ERROR",
            Self::InvalidSources => "INVALID_SOURCES",
            Self::ProvidersUnavailable => "PROVIDERS_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value handed to callers of the resolution layer
///
/// Serializes to the `{status, code, message}` envelope the UI layer expects.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code} ({status}): {message}")]
pub struct ErrorInfo {
    pub status: u16,
    pub code: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    /// Creates an error of the given kind, deriving the status from the kind
    pub fn new(code: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: code.status(),
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceError, message)
    }

    pub fn invalid_sources(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSources, message)
    }

    pub fn providers_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ProvidersUnavailable, message)
    }

    /// Whether the failed operation may be attempted again
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Returns a message suitable for display to an end user
    ///
    /// Exhaustion of every provider gets its own "try again" wording; every
    /// other kind collapses into a generic message so upstream details never
    /// leak into the UI.
    pub fn user_message(&self) -> String {
        match self.code {
            ErrorKind::ProvidersUnavailable => {
                "Streaming is temporarily unavailable. Please try again in a moment.".to_string()
            }
            ErrorKind::NotFound | ErrorKind::InvalidSources => {
                "No playable streams were found for this title.".to_string()
            }
            ErrorKind::Timeout | ErrorKind::ServiceError => {
                "Something went wrong while loading streams.".to_string()
            }
        }
    }
}

/// One provider's failure, kept for diagnostics when every provider fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: ErrorInfo,
}

impl ProviderFailure {
    pub fn new(provider: impl Into<String>, error: ErrorInfo) -> Self {
        Self {
            provider: provider.into(),
            error,
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::NotFound.status(), 404);
        assert_eq!(ErrorKind::Timeout.status(), 504);
        assert_eq!(ErrorKind::ServiceError.status(), 503);
        assert_eq!(ErrorKind::InvalidSources.status(), 404);
        assert_eq!(ErrorKind::ProvidersUnavailable.status(), 503);
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::ServiceError.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::InvalidSources.is_retryable());
        assert!(!ErrorKind::ProvidersUnavailable.is_retryable());
    }

    #[test]
    fn test_constructor_derives_status() {
        let err = ErrorInfo::providers_unavailable("all down");
        assert_eq!(err.status, 503);
        assert_eq!(err.code, ErrorKind::ProvidersUnavailable);
        assert_eq!(err.message, "all down");
    }

    #[test]
    fn test_serializes_to_envelope() {
        let err = ErrorInfo::not_found("No episodes found");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "status": 404,
                "code": "NOT_FOUND",
                "message": "No episodes found"
            })
        );
    }

    #[test]
    fn test_display() {
        let err = ErrorInfo::timeout("gogoanime took too long");
        assert_eq!(err.to_string(), "TIMEOUT (504): gogoanime took too long");
    }

    #[test]
    fn test_user_message_distinguishes_exhaustion() {
        let exhausted = ErrorInfo::providers_unavailable("x").user_message();
        let generic = ErrorInfo::service("x").user_message();
        assert!(exhausted.contains("temporarily unavailable"));
        assert_ne!(exhausted, generic);
    }

    #[test]
    fn test_provider_failure_display() {
        let failure = ProviderFailure::new("zoro", ErrorInfo::service("HTTP 500"));
        assert_eq!(failure.to_string(), "zoro: SERVICE_ERROR (503): HTTP 500");
    }
}
