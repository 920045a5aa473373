//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "ANIMERADAR_";

/// Main configuration manager
///
/// This is the primary interface for loading, saving, and managing configuration.
/// It handles file paths, defaults, and validation.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/animeradar/`
    /// - macOS: `~/Library/Application Support/animeradar/`
    /// - Windows: `%APPDATA%\animeradar\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let config_path = config_dir.join("config.toml");
        let persistence = ConfigPersistence::new(config_path);

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "animeradar")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file is corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration to file
    ///
    /// This performs validation before saving and uses atomic writes
    /// to prevent corruption.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Updates the configuration using a closure
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use animeradar_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.streaming.failover_delay_ms = 250;
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Generates a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.generate_default()?;
        Ok(true)
    }

    /// Resets the configuration to defaults
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Validates the current configuration file
    ///
    /// Returns all validation errors found, or an empty list if valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config file and applies `ANIMERADAR_*` environment overrides
    ///
    /// Supported variables:
    /// - `ANIMERADAR_APP_LOG_LEVEL`
    /// - `ANIMERADAR_STREAMING_PROVIDERS` (comma separated, priority order)
    /// - `ANIMERADAR_STREAMING_PAGE_SIZE`
    /// - `ANIMERADAR_RETRY_MAX_ATTEMPTS`
    /// - `ANIMERADAR_RETRY_BASE_DELAY_MS`
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        if let Err(errors) = config.validate() {
            let error_msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::ValidationError(error_msg));
        }

        Ok(config)
    }
}

/// Applies overrides read through `lookup` onto `config`
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

    if let Some(level) = var("APP_LOG_LEVEL") {
        match level.parse::<LogLevel>() {
            Ok(level) => config.app.log_level = level,
            Err(e) => log::warn!("Ignoring {}APP_LOG_LEVEL: {}", ENV_PREFIX, e),
        }
    }

    if let Some(providers) = var("STREAMING_PROVIDERS") {
        config.streaming.providers = providers
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
    }

    if let Some(size) = var("STREAMING_PAGE_SIZE") {
        match size.trim().parse::<usize>() {
            Ok(size) => config.streaming.page_size = size,
            Err(e) => log::warn!("Ignoring {}STREAMING_PAGE_SIZE: {}", ENV_PREFIX, e),
        }
    }

    if let Some(attempts) = var("RETRY_MAX_ATTEMPTS") {
        match attempts.trim().parse::<usize>() {
            Ok(attempts) => config.retry.max_attempts = attempts,
            Err(e) => log::warn!("Ignoring {}RETRY_MAX_ATTEMPTS: {}", ENV_PREFIX, e),
        }
    }

    if let Some(delay) = var("RETRY_BASE_DELAY_MS") {
        match delay.trim().parse::<u64>() {
            Ok(delay) => config.retry.base_delay_ms = delay,
            Err(e) => log::warn!("Ignoring {}RETRY_BASE_DELAY_MS: {}", ENV_PREFIX, e),
        }
    }
}
