//! Application-level configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Client identifier sent to provider APIs unless overridden
pub const DEFAULT_USER_AGENT: &str = concat!("AnimeRadar/", env!("CARGO_PKG_VERSION"));

/// Log level for application logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Log level for application output (`RUST_LOG` still wins)
    pub log_level: LogLevel,

    /// `User-Agent` header sent with every upstream request
    pub user_agent: String,

    /// Pretty-print JSON output from the CLI
    pub pretty_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pretty_output: true,
        }
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![Validator::not_empty(
            &self.user_agent,
            "app.user_agent",
        )])
    }

    fn merge(&mut self, other: Self) {
        self.log_level = other.log_level;
        self.user_agent = other.user_agent;
        self.pretty_output = other.pretty_output;
    }

    fn section_name(&self) -> &'static str {
        "app"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.user_agent.starts_with("AnimeRadar/"));
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = AppConfig::default();
        config.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge() {
        let mut base = AppConfig::default();
        let mut other = AppConfig::default();
        other.log_level = LogLevel::Debug;
        other.pretty_output = false;

        base.merge(other);
        assert_eq!(base.log_level, LogLevel::Debug);
        assert!(!base.pretty_output);
    }

    #[test]
    fn test_log_level_display_and_parse() {
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
