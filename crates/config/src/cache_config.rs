//! Catalog cache lifetimes

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a trending page stays fresh, in seconds
    pub trending_ttl_secs: u64,

    /// How long a seasonal listing stays fresh, in seconds
    pub seasonal_ttl_secs: u64,
}

impl CacheConfig {
    pub fn trending_ttl(&self) -> Duration {
        Duration::from_secs(self.trending_ttl_secs)
    }

    pub fn seasonal_ttl(&self) -> Duration {
        Duration::from_secs(self.seasonal_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            trending_ttl_secs: 6 * 60 * 60,
            seasonal_ttl_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl ConfigSection for CacheConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::at_least(self.trending_ttl_secs, 1, "cache.trending_ttl_secs"),
            Validator::at_least(self.seasonal_ttl_secs, 1, "cache.seasonal_ttl_secs"),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.trending_ttl_secs = other.trending_ttl_secs;
        self.seasonal_ttl_secs = other.seasonal_ttl_secs;
    }

    fn section_name(&self) -> &'static str {
        "cache"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trending_ttl_secs, 21_600);
        assert_eq!(config.seasonal_ttl_secs, 604_800);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = CacheConfig {
            trending_ttl_secs: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().len(), 1);
    }
}
