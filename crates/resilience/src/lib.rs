// crates/resilience/src/lib.rs
//! Resilience patterns for calls to unreliable upstreams
//!
//! This module provides:
//! - Retry with linear (default) or exponential backoff and a per-call
//!   retry predicate
//! - Timeout handling
//! - Cooperative cancellation
//!
//! # Example
//!
//! ```rust
//! use animeradar_resilience::{with_retry, RetryPolicy};
//! use std::time::Duration;
//!
//! # async fn fetch() -> Result<u32, String> { Ok(1) }
//! # async fn run() -> Result<u32, String> {
//! let policy = RetryPolicy::new(3).with_base_delay(Duration::from_millis(1000));
//! let value = with_retry(&policy, |e: &String| !e.contains("404"), fetch).await?;
//! # Ok(value)
//! # }
//! ```

mod error;
mod retry;
mod timeout;

pub use error::{ResilienceError, ResilienceResult};
pub use retry::{always, with_retry, Backoff, RetryPolicy};
pub use timeout::{with_cancellation, with_timeout, Timeout};
pub use tokio_util::sync::CancellationToken;
