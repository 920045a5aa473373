//! Provider orchestration settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Providers AnimeRadar ships adapters for
pub const KNOWN_PROVIDERS: [&str; 4] = ["gogoanime", "zoro", "animepahe", "animefox"];

/// One explicit `(provider, id) -> upstream id` mapping
///
/// Written in TOML as
///
/// ```toml
/// [[streaming.id_map]]
/// provider = "animepahe"
/// id = "one-piece"
/// upstream_id = "4"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdMapping {
    pub provider: String,
    pub id: String,
    pub upstream_id: String,
}

/// Settings for provider failover, validation and pagination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamingConfig {
    /// Enabled providers in priority order
    pub providers: Vec<String>,

    /// Episodes per page
    pub page_size: usize,

    /// Per-request timeout for provider API calls, in seconds
    pub request_timeout_secs: u64,

    /// Ceiling for one whole episodes/streaming lookup, in seconds
    pub overall_timeout_secs: u64,

    /// Timeout for a single source probe, in seconds
    pub probe_timeout_secs: u64,

    /// Pause before moving on to the next provider, in milliseconds
    pub failover_delay_ms: u64,

    /// Probe resolved sources and drop dead links
    pub validate_sources: bool,

    /// Base URL overrides keyed by provider name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub base_urls: BTreeMap<String, String>,

    /// Explicit cross-provider ID mappings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub id_map: Vec<IdMapping>,
}

impl StreamingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.overall_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn failover_delay(&self) -> Duration {
        Duration::from_millis(self.failover_delay_ms)
    }

    /// Base URL override for `provider`, if one is configured
    pub fn base_url(&self, provider: &str) -> Option<&str> {
        self.base_urls.get(provider).map(String::as_str)
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            providers: KNOWN_PROVIDERS.iter().map(|p| p.to_string()).collect(),
            page_size: 50,
            request_timeout_secs: 10,
            overall_timeout_secs: 30,
            probe_timeout_secs: 5,
            failover_delay_ms: 1000,
            validate_sources: true,
            base_urls: BTreeMap::new(),
            id_map: Vec::new(),
        }
    }
}

impl ConfigSection for StreamingConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        if self.providers.is_empty() {
            results.push(Err(ValidationError::new(
                "streaming.providers",
                "at least one provider must be enabled",
            )));
        }
        for provider in &self.providers {
            results.push(Validator::one_of(
                &provider.as_str(),
                &KNOWN_PROVIDERS,
                "streaming.providers",
            ));
        }
        results.push(Validator::no_duplicates(
            &self.providers,
            "streaming.providers",
        ));

        results.push(Validator::in_range(
            self.page_size,
            1,
            500,
            "streaming.page_size",
        ));
        results.push(Validator::in_range(
            self.request_timeout_secs,
            1,
            120,
            "streaming.request_timeout_secs",
        ));
        results.push(Validator::in_range(
            self.overall_timeout_secs,
            1,
            600,
            "streaming.overall_timeout_secs",
        ));
        if self.overall_timeout_secs < self.request_timeout_secs {
            results.push(Err(ValidationError::with_value(
                "streaming.overall_timeout_secs",
                "must not be shorter than request_timeout_secs",
                self.overall_timeout_secs,
            )));
        }
        results.push(Validator::in_range(
            self.probe_timeout_secs,
            1,
            60,
            "streaming.probe_timeout_secs",
        ));
        results.push(Validator::in_range(
            self.failover_delay_ms,
            0,
            60_000,
            "streaming.failover_delay_ms",
        ));

        for (provider, url) in &self.base_urls {
            let field = format!("streaming.base_urls.{}", provider);
            results.push(Validator::one_of(&provider.as_str(), &KNOWN_PROVIDERS, &field));
            results.push(Validator::http_url(url, &field));
        }

        for mapping in &self.id_map {
            results.push(Validator::one_of(
                &mapping.provider.as_str(),
                &KNOWN_PROVIDERS,
                "streaming.id_map.provider",
            ));
            results.push(Validator::not_empty(&mapping.id, "streaming.id_map.id"));
            results.push(Validator::not_empty(
                &mapping.upstream_id,
                "streaming.id_map.upstream_id",
            ));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.providers = other.providers;
        self.page_size = other.page_size;
        self.request_timeout_secs = other.request_timeout_secs;
        self.overall_timeout_secs = other.overall_timeout_secs;
        self.probe_timeout_secs = other.probe_timeout_secs;
        self.failover_delay_ms = other.failover_delay_ms;
        self.validate_sources = other.validate_sources;
        self.base_urls.extend(other.base_urls);
        self.id_map.extend(other.id_map);
    }

    fn section_name(&self) -> &'static str {
        "streaming"
    }
}
