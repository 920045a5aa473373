// crates/cache/src/catalog.rs
//! Catalog client interface and its caching facade

use crate::cache::ResponseCache;
use crate::key::{CacheKey, Season};
use animeradar_config::CacheConfig;
use animeradar_core::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog entry for one anime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl Media {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            native_title: None,
            description: None,
            release_year: None,
            genres: Vec::new(),
            rating: None,
            episodes: None,
            poster: None,
        }
    }
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub media: Vec<Media>,
    pub current_page: u32,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub genre: Option<String>,
    pub season: Option<Season>,
    pub year: Option<u32>,
}

/// Metadata catalog the streaming layer sits next to
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn trending(&self, page: u32) -> Result<MediaPage>;

    async fn seasonal(&self, season: Season, year: u32) -> Result<MediaPage>;

    async fn search(&self, query: &str, filters: &SearchFilters) -> Result<MediaPage>;

    async fn by_id(&self, id: &str) -> Result<Media>;
}

/// Serves trending and seasonal listings from a [`ResponseCache`]
///
/// Search and single-title lookups always go to the client.
pub struct CachedCatalog<C> {
    client: C,
    cache: ResponseCache<MediaPage>,
    trending_ttl: Duration,
    seasonal_ttl: Duration,
}

impl<C: CatalogClient> CachedCatalog<C> {
    /// Uses the 6 hour trending and 7 day seasonal lifetimes
    pub fn new(client: C) -> Self {
        Self::with_config(client, &CacheConfig::default())
    }

    pub fn with_config(client: C, config: &CacheConfig) -> Self {
        Self {
            client,
            cache: ResponseCache::new(),
            trending_ttl: config.trending_ttl(),
            seasonal_ttl: config.seasonal_ttl(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &ResponseCache<MediaPage> {
        &self.cache
    }

    /// Page 0 is served as page 1
    pub async fn trending(&self, page: u32) -> Result<MediaPage> {
        let page = page.max(1);
        let key = CacheKey::Trending { page }.to_string();
        self.cache
            .get_or_fetch(&key, self.trending_ttl, || self.client.trending(page))
            .await
    }

    pub async fn seasonal(&self, season: Season, year: u32) -> Result<MediaPage> {
        let key = CacheKey::Seasonal { season, year }.to_string();
        self.cache
            .get_or_fetch(&key, self.seasonal_ttl, || self.client.seasonal(season, year))
            .await
    }

    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<MediaPage> {
        self.client.search(query, filters).await
    }

    pub async fn by_id(&self, id: &str) -> Result<Media> {
        self.client.by_id(id).await
    }
}
