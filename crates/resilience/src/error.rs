// crates/resilience/src/error.rs
//! Error types for resilience operations

use thiserror::Error;

/// Result type for resilience operations
pub type ResilienceResult<T> = Result<T, ResilienceError>;

/// Errors produced by the resilience wrappers themselves
///
/// Retry never produces its own error: when attempts run out, the
/// operation's last error is returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResilienceError {
    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Operation was cancelled
    #[error("Operation was cancelled")]
    Cancelled,
}
