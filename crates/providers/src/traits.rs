// crates/providers/src/traits.rs

use animeradar_core::{Episode, Result, StreamingData};
use async_trait::async_trait;

/// One upstream source of episodes and stream URLs
///
/// IDs passed in are already in the provider's own ID space. Every failure
/// leaving an implementation is an [`animeradar_core::ErrorInfo`]; an empty
/// but well-formed upstream answer is `NOT_FOUND`.
#[async_trait]
pub trait StreamingProvider: Send + Sync {
    /// Stable identifier used in configuration and logs
    fn name(&self) -> &str;

    fn metadata(&self) -> ProviderMetadata;

    /// Lists every episode of an anime in upstream order
    async fn get_episodes(&self, anime_id: &str) -> Result<Vec<Episode>>;

    /// Resolves playable sources for one episode
    async fn get_streaming_sources(&self, episode_id: &str) -> Result<StreamingData>;
}

/// Provider metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub name: String,
    pub description: String,
    pub base_url: String,
}
