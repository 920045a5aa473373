// crates/providers/src/profile.rs
//! Static description of each upstream API

use std::collections::BTreeMap;

/// Payload layout an upstream speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `/info/{id}` and `/watch/{id}` (gogoanime, zoro)
    Consumet,
    /// Single endpoint selected by `?m=release|links`
    AnimePahe,
    /// `/anime/{id}/episodes` and `/episode/{id}/sources`
    AnimeFox,
}

/// A fully resolved upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl UpstreamRequest {
    fn path(base: &str, path: String) -> Self {
        Self {
            url: format!("{}{}", base, path),
            query: Vec::new(),
        }
    }

    fn query(base: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            url: base.to_string(),
            query: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Everything that distinguishes one provider from another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub shape: ResponseShape,
    /// Headers sent on every API call to this provider
    pub request_headers: BTreeMap<String, String>,
    /// Headers players must send when fetching this provider's streams
    pub stream_headers: BTreeMap<String, String>,
}

impl ProviderProfile {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        shape: ResponseShape,
    ) -> Self {
        let name = name.into();
        Self {
            description: format!("{} streaming API", name),
            name,
            base_url: trim_base(base_url.into()),
            shape,
            request_headers: BTreeMap::new(),
            stream_headers: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url.into());
        self
    }

    pub fn with_request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_stream_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.stream_headers.insert(name.into(), value.into());
        self
    }

    pub fn gogoanime() -> Self {
        Self::new(
            "gogoanime",
            "https://api.consumet.org/anime/gogoanime",
            ResponseShape::Consumet,
        )
        .with_description("Gogoanime via the Consumet API")
    }

    pub fn zoro() -> Self {
        Self::new(
            "zoro",
            "https://api.consumet.org/anime/zoro",
            ResponseShape::Consumet,
        )
        .with_description("Zoro via the Consumet API")
    }

    pub fn animepahe() -> Self {
        Self::new("animepahe", "https://animepahe.ru/api", ResponseShape::AnimePahe)
            .with_description("AnimePahe release and link API")
            .with_request_header("Accept", "application/json")
            .with_request_header("Referer", "https://animepahe.ru/")
            .with_stream_header("Referer", "https://animepahe.ru/")
    }

    pub fn animefox() -> Self {
        Self::new("animefox", "https://animefox.tv/api/v1", ResponseShape::AnimeFox)
            .with_description("AnimeFox public API")
    }

    /// Built-in profile by provider name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "gogoanime" => Some(Self::gogoanime()),
            "zoro" => Some(Self::zoro()),
            "animepahe" => Some(Self::animepahe()),
            "animefox" => Some(Self::animefox()),
            _ => None,
        }
    }

    pub fn episodes_request(&self, anime_id: &str) -> UpstreamRequest {
        let base = &self.base_url;
        match self.shape {
            ResponseShape::Consumet => {
                UpstreamRequest::path(base, format!("/info/{}", urlencoding::encode(anime_id)))
            }
            ResponseShape::AnimePahe => {
                UpstreamRequest::query(base, &[("m", "release"), ("id", anime_id)])
            }
            ResponseShape::AnimeFox => UpstreamRequest::path(
                base,
                format!("/anime/{}/episodes", urlencoding::encode(anime_id)),
            ),
        }
    }

    pub fn sources_request(&self, episode_id: &str) -> UpstreamRequest {
        let base = &self.base_url;
        match self.shape {
            ResponseShape::Consumet => {
                UpstreamRequest::path(base, format!("/watch/{}", urlencoding::encode(episode_id)))
            }
            ResponseShape::AnimePahe => {
                UpstreamRequest::query(base, &[("m", "links"), ("id", episode_id)])
            }
            ResponseShape::AnimeFox => UpstreamRequest::path(
                base,
                format!("/episode/{}/sources", urlencoding::encode(episode_id)),
            ),
        }
    }
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
