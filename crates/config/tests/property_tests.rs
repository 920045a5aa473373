//! Property-style checks for the configuration system

use animeradar_config::{Config, ConfigManager, KNOWN_PROVIDERS};
use tempfile::TempDir;

#[test]
fn property_serialization_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config
        .streaming
        .base_urls
        .insert("animefox".to_string(), "https://mirror.example/api/v1".to_string());

    let toml_string = toml::to_string(&config)?;
    let deserialized: Config = toml::from_str(&toml_string)?;
    assert_eq!(config, deserialized);
    Ok(())
}

#[test]
fn property_load_save_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;

    manager.save(&Config::default())?;
    let loaded = manager.load()?;
    manager.save(&loaded)?;
    assert_eq!(loaded, manager.load()?);
    Ok(())
}

#[test]
fn property_every_single_provider_is_valid() {
    for provider in KNOWN_PROVIDERS {
        let mut config = Config::default();
        config.streaming.providers = vec![provider.to_string()];
        assert!(config.validate().is_ok(), "{} alone should be valid", provider);
    }
}

#[test]
fn property_every_provider_order_is_valid() {
    let mut providers: Vec<String> = KNOWN_PROVIDERS.iter().map(|p| p.to_string()).collect();
    for _ in 0..providers.len() {
        providers.rotate_left(1);
        let mut config = Config::default();
        config.streaming.providers = providers.clone();
        assert!(config.validate().is_ok());
    }
}

#[test]
fn property_validation_deterministic() {
    let mut config = Config::default();
    config.streaming.page_size = 0;

    let e1 = config.validate().unwrap_err();
    let e2 = config.validate().unwrap_err();
    assert_eq!(e1, e2);
}

#[test]
fn property_merge_with_self_is_identity() {
    let mut config = Config::default();
    config.merge(Config::default());
    assert_eq!(config, Config::default());
}
