//! Retry settings applied to every provider call

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the wait between attempts grows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    Linear,
    Exponential,
}

impl std::fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackoffKind::Linear => write!(f, "linear"),
            BackoffKind::Exponential => write!(f, "exponential"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per provider, first one included
    pub max_attempts: usize,

    /// Backoff unit, in milliseconds
    pub base_delay_ms: u64,

    /// Upper bound for a single wait, in milliseconds
    pub max_delay_ms: u64,

    pub backoff: BackoffKind,

    /// Growth factor, only read for exponential backoff
    pub multiplier: f64,
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff: BackoffKind::Linear,
            multiplier: 2.0,
        }
    }
}

impl ConfigSection for RetryConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::in_range(self.max_attempts, 1, 10, "retry.max_attempts"),
            Validator::in_range(self.base_delay_ms, 0, 60_000, "retry.base_delay_ms"),
            Validator::in_range(self.max_delay_ms, 0, 300_000, "retry.max_delay_ms"),
        ];
        if self.backoff == BackoffKind::Exponential {
            results.push(Validator::in_range(
                self.multiplier,
                1.0,
                10.0,
                "retry.multiplier",
            ));
        }
        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.max_attempts = other.max_attempts;
        self.base_delay_ms = other.base_delay_ms;
        self.max_delay_ms = other.max_delay_ms;
        self.backoff = other.backoff;
        self.multiplier = other.multiplier;
    }

    fn section_name(&self) -> &'static str {
        "retry"
    }
}
