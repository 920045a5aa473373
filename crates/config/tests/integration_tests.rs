//! Integration tests for the configuration system

use animeradar_config::{
    BackoffKind, CacheConfig, Config, ConfigManager, ConfigSection, IdMapping, RetryConfig,
    StreamingConfig, CONFIG_VERSION,
};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    init_logging();
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let created = manager.initialize()?;
    assert!(created);

    let config = manager.load()?;
    assert_eq!(config.version, CONFIG_VERSION);

    let mut modified = config.clone();
    modified.streaming.providers = vec!["animefox".to_string(), "gogoanime".to_string()];
    modified.retry.backoff = BackoffKind::Exponential;
    manager.save(&modified)?;

    let reloaded = manager.load()?;
    assert_eq!(reloaded.streaming.providers[0], "animefox");
    assert_eq!(reloaded.retry.backoff, BackoffKind::Exponential);

    manager.reset()?;
    assert_eq!(manager.load()?, Config::default());

    Ok(())
}

#[test]
fn test_config_validation_integration() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    manager.save(&Config::default())?;
    assert!(manager.validate()?.is_empty());

    let mut invalid = Config::default();
    invalid.streaming.probe_timeout_secs = 0;
    assert!(manager.save(&invalid).is_err());

    Ok(())
}

#[test]
fn test_atomic_save_keeps_backup() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let config = Config::default();
    manager.save(&config)?;
    assert!(manager.config_path().exists());

    manager.save(&config)?;
    let backup_path = manager.config_path().with_extension("toml.backup");
    assert!(backup_path.exists());

    Ok(())
}

#[test]
fn test_hand_written_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    std::fs::write(
        manager.config_path(),
        r#"
version = 1

[app]
log_level = "debug"

[streaming]
providers = ["animepahe", "zoro"]
failover_delay_ms = 0
validate_sources = false

[streaming.base_urls]
zoro = "http://127.0.0.1:3000/anime/zoro"

[[streaming.id_map]]
provider = "animepahe"
id = "21"
upstream_id = "4"

[retry]
max_attempts = 2
base_delay_ms = 250

[cache]
trending_ttl_secs = 600
"#,
    )?;

    let config = manager.load()?;
    assert!(config.validate().is_ok());
    assert_eq!(config.streaming.providers, vec!["animepahe", "zoro"]);
    assert!(!config.streaming.validate_sources);
    assert_eq!(
        config.streaming.base_url("zoro"),
        Some("http://127.0.0.1:3000/anime/zoro")
    );
    assert_eq!(
        config.streaming.id_map,
        vec![IdMapping {
            provider: "animepahe".to_string(),
            id: "21".to_string(),
            upstream_id: "4".to_string(),
        }]
    );
    assert_eq!(config.retry.max_attempts, 2);
    assert_eq!(config.cache.trending_ttl_secs, 600);
    assert_eq!(config.cache.seasonal_ttl_secs, 604_800);

    Ok(())
}

#[test]
fn test_section_names() {
    assert_eq!(StreamingConfig::default().section_name(), "streaming");
    assert_eq!(RetryConfig::default().section_name(), "retry");
    assert_eq!(CacheConfig::default().section_name(), "cache");
}

#[test]
fn test_env_overrides_with_manager() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.save(&Config::default())?;

    std::env::set_var("ANIMERADAR_RETRY_MAX_ATTEMPTS", "4");
    let config = manager.load_with_env_overrides();
    std::env::remove_var("ANIMERADAR_RETRY_MAX_ATTEMPTS");

    assert_eq!(config?.retry.max_attempts, 4);
    Ok(())
}
