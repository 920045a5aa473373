//! Episode listing types

use serde::{Deserialize, Serialize};

/// One episode as reported by a provider
///
/// `id` is minted by the provider that produced the episode and is only
/// meaningful within that provider's ID space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Episode {
    /// Creates an episode titled `"Episode {number}"`
    pub fn new(id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            number,
            title: Some(default_title(number)),
            image: None,
            description: None,
            duration: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Title used when the upstream does not supply one
pub fn default_title(number: u32) -> String {
    format!("Episode {}", number)
}

/// One page of a provider's episode list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePage {
    pub episodes: Vec<Episode>,
    pub has_next_page: bool,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl EpisodePage {
    /// Slices a complete episode list into a 1-based page
    ///
    /// Page 0 is treated as page 1. A page past the end is empty and reports
    /// no next page, but still carries the full `total`.
    pub fn paginate(episodes: Vec<Episode>, page: usize, page_size: usize) -> Self {
        let total = episodes.len();
        let page = page.max(1);
        let page_size = page_size.max(1);
        let start = (page - 1).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(total);

        let episodes = if start >= total {
            Vec::new()
        } else {
            episodes.into_iter().skip(start).take(end - start).collect()
        };

        Self {
            episodes,
            has_next_page: end < total,
            total,
            provider: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes(count: u32) -> Vec<Episode> {
        (1..=count).map(|n| Episode::new(format!("ep-{}", n), n)).collect()
    }

    #[test]
    fn test_default_title() {
        let ep = Episode::new("ep-7", 7);
        assert_eq!(ep.title.as_deref(), Some("Episode 7"));
    }

    #[test]
    fn test_paginate_first_page() {
        let page = EpisodePage::paginate(episodes(120), 1, 50);
        assert_eq!(page.episodes.len(), 50);
        assert_eq!(page.episodes[0].number, 1);
        assert!(page.has_next_page);
        assert_eq!(page.total, 120);
    }

    #[test]
    fn test_paginate_last_page() {
        let page = EpisodePage::paginate(episodes(120), 3, 50);
        assert_eq!(page.episodes.len(), 20);
        assert_eq!(page.episodes[0].number, 101);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_paginate_exact_boundary() {
        let page = EpisodePage::paginate(episodes(100), 2, 50);
        assert_eq!(page.episodes.len(), 50);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_paginate_past_end() {
        let page = EpisodePage::paginate(episodes(10), 5, 50);
        assert!(page.episodes.is_empty());
        assert!(!page.has_next_page);
        assert_eq!(page.total, 10);
    }

    #[test]
    fn test_paginate_page_zero_is_first_page() {
        let page = EpisodePage::paginate(episodes(10), 0, 4);
        assert_eq!(page.episodes[0].number, 1);
        assert!(page.has_next_page);
    }

    #[test]
    fn test_page_json_field_names() {
        let page = EpisodePage::paginate(episodes(1), 1, 50).with_provider("zoro");
        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(json["hasNextPage"], false);
        assert_eq!(json["provider"], "zoro");
        assert!(json["episodes"][0].get("image").is_none());
    }
}
