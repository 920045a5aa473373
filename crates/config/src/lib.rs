//! AnimeRadar Configuration System
//!
//! Settings for provider failover, retries, source validation and the catalog
//! cache, stored as TOML. New features can add config sections by implementing
//! the `ConfigSection` trait.
//!
//! # Architecture
//!
//! - **Trait-based**: Each feature defines its config as a type implementing `ConfigSection`
//! - **Layered**: defaults < file < `ANIMERADAR_*` environment variables
//! - **Atomic writes**: Config files are never left in a corrupted state
//!
//! # Example
//!
//! ```rust,no_run
//! use animeradar_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Providers: {:?}", config.streaming.providers);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
mod cache_config;
mod retry_config;
mod streaming_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_env_overrides, ConfigManager, ENV_PREFIX};
pub use validation::{ConfigSection, Validator};

// Re-export config sections
pub use app_config::{AppConfig, LogLevel, DEFAULT_USER_AGENT};
pub use cache_config::CacheConfig;
pub use retry_config::{BackoffKind, RetryConfig};
pub use streaming_config::{IdMapping, StreamingConfig, KNOWN_PROVIDERS};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Provider order, timeouts and validation
    pub streaming: StreamingConfig,

    /// Per-provider retry policy
    pub retry: RetryConfig,

    /// Catalog cache lifetimes
    pub cache: CacheConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.streaming.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.retry.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.cache.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.streaming.merge(other.streaming);
        self.retry.merge(other.retry);
        self.cache.merge(other.cache);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            streaming: StreamingConfig::default(),
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
