// crates/resilience/src/timeout.rs
//! Timeout and cancellation wrappers for futures

use crate::error::{ResilienceError, ResilienceResult};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs a future with a deadline
///
/// The future is dropped when the deadline passes.
pub async fn with_timeout<F>(duration: Duration, future: F) -> ResilienceResult<F::Output>
where
    F: Future,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| ResilienceError::Timeout(duration))
}

/// Runs a future until it completes or `token` is cancelled
pub async fn with_cancellation<F>(token: &CancellationToken, future: F) -> ResilienceResult<F::Output>
where
    F: Future,
{
    token
        .run_until_cancelled(future)
        .await
        .ok_or(ResilienceError::Cancelled)
}

/// Timeout wrapper for operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Creates a new timeout
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Gets the timeout duration
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Executes a future with this timeout
    pub async fn execute<F>(&self, future: F) -> ResilienceResult<F::Output>
    where
        F: Future,
    {
        with_timeout(self.duration, future).await
    }

    /// Executes a future with this timeout, also honouring `token`
    pub async fn execute_cancellable<F>(
        &self,
        token: &CancellationToken,
        future: F,
    ) -> ResilienceResult<F::Output>
    where
        F: Future,
    {
        with_cancellation(token, with_timeout(self.duration, future)).await?
    }
}
