// crates/providers/src/validator.rs
//! Reachability filtering for resolved stream URLs

use animeradar_core::{ErrorInfo, Result, StreamingData, StreamingSource};
use animeradar_network::Client;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Something that can ask an origin whether a URL is servable
#[async_trait]
pub trait SourceProbe: Send + Sync {
    /// Returns true when the URL answered 200 or 206
    async fn probe(&self, source: &StreamingSource, headers: &BTreeMap<String, String>) -> bool;
}

/// HTTP probe: plain `HEAD` for manifests, single-byte range `HEAD` otherwise
#[async_trait]
impl SourceProbe for Client {
    async fn probe(&self, source: &StreamingSource, headers: &BTreeMap<String, String>) -> bool {
        let ranged = !source.is_m3u8;
        match Client::probe(self, &source.url, headers, ranged, None).await {
            Ok(status) => {
                log::debug!("Probe {} -> {}", source.url, status);
                status == 200 || status == 206
            }
            Err(e) => {
                log::debug!("Probe {} failed: {}", source.url, e);
                false
            }
        }
    }
}

/// Drops sources whose URL does not answer
pub struct SourceValidator {
    probe: Box<dyn SourceProbe>,
    timeout: Duration,
    enabled: bool,
}

impl SourceValidator {
    /// Creates a validator with a 5 second per-probe timeout
    pub fn new(probe: impl SourceProbe + 'static) -> Self {
        Self {
            probe: Box::new(probe),
            timeout: Duration::from_secs(5),
            enabled: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A validator that accepts everything without probing
    pub fn disabled() -> Self {
        Self {
            probe: Box::new(AcceptAll),
            timeout: Duration::ZERO,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Probes every source concurrently and keeps the live ones in input order
    ///
    /// A probe that exceeds the timeout counts as dead.
    pub async fn validate_sources(
        &self,
        sources: Vec<StreamingSource>,
        headers: &BTreeMap<String, String>,
    ) -> Vec<StreamingSource> {
        if !self.enabled {
            return sources;
        }

        let checks = sources.iter().map(|source| async move {
            tokio::time::timeout(self.timeout, self.probe.probe(source, headers))
                .await
                .unwrap_or(false)
        });
        let verdicts = futures::future::join_all(checks).await;

        sources
            .into_iter()
            .zip(verdicts)
            .filter_map(|(source, alive)| alive.then_some(source))
            .collect()
    }

    /// Validates the sources of one resolved episode
    ///
    /// Probes carry the episode's own request headers. Losing every source is
    /// `INVALID_SOURCES`, never an empty success.
    pub async fn validate(&self, mut data: StreamingData) -> Result<StreamingData> {
        let candidates = data.sources.len();
        let headers = data.request_headers();
        data.sources = self
            .validate_sources(std::mem::take(&mut data.sources), &headers)
            .await;

        if data.sources.is_empty() {
            return Err(ErrorInfo::invalid_sources(format!(
                "none of {} candidate sources answered",
                candidates
            )));
        }
        if data.sources.len() < candidates {
            log::debug!(
                "Validation kept {} of {} sources",
                data.sources.len(),
                candidates
            );
        }
        Ok(data)
    }
}

struct AcceptAll;

#[async_trait]
impl SourceProbe for AcceptAll {
    async fn probe(&self, _source: &StreamingSource, _headers: &BTreeMap<String, String>) -> bool {
        true
    }
}
