// crates/providers/src/adapter.rs
//! Generic HTTP adapter driven by a [`ProviderProfile`]

use crate::mapping::{parse_episodes, parse_streaming_data};
use crate::profile::{ProviderProfile, UpstreamRequest};
use crate::traits::{ProviderMetadata, StreamingProvider};
use animeradar_core::normalize::sanitize_streaming_data;
use animeradar_core::{Episode, ErrorInfo, Result, StreamingData};
use animeradar_network::Client;
use async_trait::async_trait;
use serde_json::Value;

/// Adapter for any upstream described by a [`ProviderProfile`]
///
/// Each call performs exactly one HTTP request; retrying belongs to the
/// orchestrator. Transport failures are classified into [`ErrorInfo`] here
/// and never leave the adapter raw.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    profile: ProviderProfile,
    client: Client,
}

impl HttpProvider {
    pub fn new(profile: ProviderProfile, client: Client) -> Self {
        Self { profile, client }
    }

    /// Built-in provider by name, optionally pointed at another base URL
    pub fn builtin(name: &str, base_url: Option<&str>, client: Client) -> Option<Self> {
        let mut profile = ProviderProfile::builtin(name)?;
        if let Some(url) = base_url {
            profile = profile.with_base_url(url);
        }
        Some(Self::new(profile, client))
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    async fn fetch(&self, request: UpstreamRequest) -> Result<Value> {
        self.client
            .get_json(&request.url, &request.query, &self.profile.request_headers)
            .await
            .map_err(|e| {
                let info = ErrorInfo::from(e);
                ErrorInfo::new(info.code, format!("{}: {}", self.profile.name, info.message))
            })
    }
}

#[async_trait]
impl StreamingProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.profile.name.clone(),
            description: self.profile.description.clone(),
            base_url: self.profile.base_url.clone(),
        }
    }

    async fn get_episodes(&self, anime_id: &str) -> Result<Vec<Episode>> {
        let body = self.fetch(self.profile.episodes_request(anime_id)).await?;
        parse_episodes(self.profile.shape, &self.profile.name, &body)
    }

    async fn get_streaming_sources(&self, episode_id: &str) -> Result<StreamingData> {
        let body = self.fetch(self.profile.sources_request(episode_id)).await?;
        let mut data = parse_streaming_data(self.profile.shape, &self.profile.name, &body)?;

        // upstream headers win over the profile's defaults
        let mut headers = self.profile.stream_headers.clone();
        headers.extend(data.request_headers());
        data = data.with_headers(headers);

        Ok(sanitize_streaming_data(data))
    }
}
