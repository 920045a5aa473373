// crates/resilience/src/retry.rs
//! Retry policies with linear or exponential backoff

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How the wait between attempts grows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// `base_delay * attempt`
    Linear,
    /// `base_delay * multiplier^(attempt - 1)`
    Exponential { multiplier: f64 },
}

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first attempt)
    max_attempts: usize,
    /// Delay unit the backoff is computed from
    base_delay: Duration,
    /// Upper bound for any single wait
    max_delay: Duration,
    backoff: Backoff,
}

impl RetryPolicy {
    /// Creates a policy with linear backoff and a 1s base delay
    ///
    /// `max_attempts` below 1 is raised to 1: the operation always runs once.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
            backoff: Backoff::Linear,
        }
    }

    /// A policy that runs the operation exactly once
    pub fn no_retry() -> Self {
        Self::new(1)
    }

    /// Sets the base delay
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff strategy
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Wait before the attempt that follows failed attempt number `attempt`
    ///
    /// Attempts are numbered from 1; attempt 0 has no delay.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base = self.base_delay.as_millis() as f64;
        let millis = match self.backoff {
            Backoff::Linear => base * attempt as f64,
            Backoff::Exponential { multiplier } => {
                base * multiplier.powi(attempt.saturating_sub(1).min(i32::MAX as usize) as i32)
            }
        };

        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped.max(0.0) as u64)
    }

    /// Returns the maximum number of attempts
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Sum of every wait the policy can insert
    pub fn worst_case_delay(&self) -> Duration {
        (1..self.max_attempts)
            .map(|attempt| self.delay_for_attempt(attempt))
            .sum()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Runs `operation` until it succeeds, the policy runs out of attempts, or
/// `should_retry` rejects an error
///
/// The last error is returned unchanged so callers keep their own error
/// classification. Waits suspend the task via `tokio::time::sleep`.
pub async fn with_retry<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt >= policy.max_attempts() || !should_retry(&e) {
                    return Err(e);
                }

                let delay = policy.delay_for_attempt(attempt);
                log::debug!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt,
                    policy.max_attempts(),
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Retry predicate that accepts every error
pub fn always<E>(_: &E) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_millis(1000));
        assert_eq!(policy.backoff(), Backoff::Linear);
    }

    #[test]
    fn test_zero_attempts_raised_to_one() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::new(4).with_base_delay(Duration::from_millis(1000));

        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(3000));
    }

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::new(4)
            .with_base_delay(Duration::from_millis(100))
            .with_backoff(Backoff::Exponential { multiplier: 2.0 });

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn test_max_delay_capping() {
        let policy = RetryPolicy::new(10)
            .with_base_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5));

        assert_eq!(policy.delay_for_attempt(9), Duration::from_secs(5));
    }

    #[test]
    fn test_worst_case_delay() {
        // 1000 * (1 + 2)
        let policy = RetryPolicy::new(3).with_base_delay(Duration::from_millis(1000));
        assert_eq!(policy.worst_case_delay(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_success_first_attempt() {
        let policy = RetryPolicy::new(3);
        let calls = AtomicUsize::new(0);

        let result = with_retry(&policy, always, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(42)
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_success_after_failures() {
        let policy = RetryPolicy::new(3);
        let calls = AtomicUsize::new(0);

        let result = with_retry(&policy, always, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err("temporary error")
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_returns_last_error() {
        let policy = RetryPolicy::new(3);
        let calls = AtomicUsize::new(0);

        let result: Result<i32, String> = with_retry(&policy, always, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(format!("failure {}", n))
        })
        .await;

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_respects_predicate() {
        let policy = RetryPolicy::new(5);
        let calls = AtomicUsize::new(0);

        let result: Result<(), &str> = with_retry(
            &policy,
            |e: &&str| *e != "not found",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("not found")
            },
        )
        .await;

        assert_eq!(result, Err("not found"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_waits_linear_delays() {
        let policy = RetryPolicy::new(3).with_base_delay(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();

        let _: Result<(), &str> = with_retry(&policy, always, || async { Err("down") }).await;

        // 1000ms after the first failure, 2000ms after the second
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }
}
