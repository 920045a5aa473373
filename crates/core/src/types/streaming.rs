//! Streaming source types

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One playable variant of an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingSource {
    pub url: String,
    pub quality: String,
    #[serde(rename = "isM3U8")]
    pub is_m3u8: bool,
}

impl StreamingSource {
    pub fn new(url: impl Into<String>, quality: impl Into<String>, is_m3u8: bool) -> Self {
        Self {
            url: url.into(),
            quality: quality.into(),
            is_m3u8,
        }
    }

    /// Numeric prefix of the quality label, e.g. `720` for `"720p"`
    pub fn resolution(&self) -> Option<u32> {
        parse_resolution(&self.quality)
    }
}

/// A subtitle track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    pub url: String,
    pub lang: String,
}

impl Subtitle {
    pub fn new(url: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            lang: lang.into(),
        }
    }
}

/// Everything a player needs to start one episode
///
/// `headers` must be sent with every request for the contained URLs; origins
/// reject playback without them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingData {
    pub sources: Vec<StreamingSource>,
    pub subtitles: Vec<Subtitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl StreamingData {
    pub fn new(sources: Vec<StreamingSource>, subtitles: Vec<Subtitle>) -> Self {
        Self {
            sources,
            subtitles,
            headers: None,
            provider: None,
        }
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = if headers.is_empty() { None } else { Some(headers) };
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Headers to attach to downstream requests, empty when none are required
    pub fn request_headers(&self) -> BTreeMap<String, String> {
        self.headers.clone().unwrap_or_default()
    }

    /// Sorts sources by descending resolution, see [`sort_by_quality`]
    pub fn sort_sources(&mut self) {
        sort_by_quality(&mut self.sources);
    }
}

/// Parses the integer prefix of a quality label
///
/// `"1080p"` → 1080, `"720"` → 720, `"auto"` / `"default"` → `None`.
pub fn parse_resolution(quality: &str) -> Option<u32> {
    let digits: String = quality
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Sorts sources by resolution, highest first
///
/// Labels without a numeric prefix sort after every numeric one. The sort is
/// stable, so equal qualities keep their relative order.
pub fn sort_by_quality(sources: &mut [StreamingSource]) {
    sources.sort_by(|a, b| match (a.resolution(), b.resolution()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
