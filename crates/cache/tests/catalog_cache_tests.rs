//! Cache lifetimes, driven by the paused tokio clock

use animeradar_cache::{
    CachedCatalog, CatalogClient, Media, MediaPage, ResponseCache, SearchFilters, Season,
};
use animeradar_config::CacheConfig;
use animeradar_core::{ErrorInfo, ErrorKind, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Counts calls and can be switched into failing
#[derive(Default)]
struct CountingCatalog {
    trending_calls: AtomicUsize,
    seasonal_calls: AtomicUsize,
    search_calls: AtomicUsize,
    failing: AtomicBool,
}

impl CountingCatalog {
    fn page(&self, title: String) -> Result<MediaPage> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ErrorInfo::service("catalog down"));
        }
        Ok(MediaPage {
            media: vec![Media::new("1", title)],
            current_page: 1,
            has_next_page: false,
        })
    }
}

#[async_trait]
impl CatalogClient for CountingCatalog {
    async fn trending(&self, page: u32) -> Result<MediaPage> {
        let n = self.trending_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.page(format!("trending p{} #{}", page, n))
    }

    async fn seasonal(&self, season: Season, year: u32) -> Result<MediaPage> {
        let n = self.seasonal_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.page(format!("{} {} #{}", season, year, n))
    }

    async fn search(&self, query: &str, _filters: &SearchFilters) -> Result<MediaPage> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.page(query.to_string())
    }

    async fn by_id(&self, id: &str) -> Result<Media> {
        Ok(Media::new(id, "by id"))
    }
}

fn title(page: &MediaPage) -> &str {
    &page.media[0].title
}

#[tokio::test(start_paused = true)]
async fn test_fresh_entry_skips_fetch() {
    let cache = ResponseCache::new();
    let calls = AtomicUsize::new(0);
    let counter = &calls;
    let fetch = move || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, ErrorInfo>(42)
    };

    assert_eq!(cache.get_or_fetch("k", HOUR, fetch).await, Ok(42));
    tokio::time::advance(HOUR - Duration::from_secs(1)).await;
    assert_eq!(cache.get_or_fetch("k", HOUR, fetch).await, Ok(42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(cache.get_or_fetch("k", HOUR, fetch).await, Ok(42));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failed_refresh_keeps_stale_entry() {
    let cache = ResponseCache::new();
    cache
        .get_or_fetch("k", HOUR, || async { Ok::<_, ErrorInfo>("old") })
        .await
        .unwrap();

    tokio::time::advance(HOUR * 2).await;
    let err = cache
        .get_or_fetch("k", HOUR, || async { Err::<&str, _>(ErrorInfo::timeout("slow")) })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorKind::Timeout);

    // still stored, still stale
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("k", HOUR * 3).await, Some("old"));
    assert_eq!(cache.get("k", HOUR).await, None);
}

#[tokio::test(start_paused = true)]
async fn test_trending_cached_for_six_hours() {
    let catalog = CachedCatalog::new(CountingCatalog::default());

    let first = catalog.trending(1).await.unwrap();
    tokio::time::advance(HOUR * 5).await;
    let again = catalog.trending(1).await.unwrap();
    assert_eq!(title(&first), title(&again));
    assert_eq!(catalog.client().trending_calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(HOUR).await;
    let refreshed = catalog.trending(1).await.unwrap();
    assert_eq!(title(&refreshed), "trending p1 #2");
}

#[tokio::test(start_paused = true)]
async fn test_trending_page_zero_shares_first_page() {
    let catalog = CachedCatalog::new(CountingCatalog::default());

    let zero = catalog.trending(0).await.unwrap();
    assert_eq!(title(&zero), "trending p1 #1");

    let first = catalog.trending(1).await.unwrap();
    assert_eq!(title(&first), "trending p1 #1");
    assert_eq!(catalog.client().trending_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_seasonal_keyed_per_season_and_year() {
    let catalog = CachedCatalog::new(CountingCatalog::default());

    let fall = catalog.seasonal(Season::Fall, 2024).await.unwrap();
    let winter = catalog.seasonal(Season::Winter, 2025).await.unwrap();
    assert_eq!(title(&fall), "fall 2024 #1");
    assert_eq!(title(&winter), "winter 2025 #2");

    tokio::time::advance(DAY * 6).await;
    assert_eq!(title(&catalog.seasonal(Season::Fall, 2024).await.unwrap()), "fall 2024 #1");
    assert_eq!(catalog.client().seasonal_calls.load(Ordering::SeqCst), 2);

    tokio::time::advance(DAY).await;
    assert_eq!(title(&catalog.seasonal(Season::Fall, 2024).await.unwrap()), "fall 2024 #3");
}

#[tokio::test(start_paused = true)]
async fn test_stale_listing_survives_catalog_outage() {
    let catalog = CachedCatalog::new(CountingCatalog::default());
    catalog.trending(1).await.unwrap();

    tokio::time::advance(HOUR * 7).await;
    catalog.client().failing.store(true, Ordering::SeqCst);
    assert!(catalog.trending(1).await.is_err());
    assert_eq!(catalog.cache().len().await, 1);

    catalog.client().failing.store(false, Ordering::SeqCst);
    assert_eq!(title(&catalog.trending(1).await.unwrap()), "trending p1 #3");
}

#[tokio::test(start_paused = true)]
async fn test_configured_ttls() {
    let config = CacheConfig {
        trending_ttl_secs: 10,
        seasonal_ttl_secs: 20,
    };
    let catalog = CachedCatalog::with_config(CountingCatalog::default(), &config);

    catalog.trending(1).await.unwrap();
    tokio::time::advance(Duration::from_secs(10)).await;
    catalog.trending(1).await.unwrap();
    assert_eq!(catalog.client().trending_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_search_is_never_cached() {
    let catalog = CachedCatalog::new(CountingCatalog::default());
    let filters = SearchFilters {
        genre: Some("Action".to_string()),
        ..SearchFilters::default()
    };

    catalog.search("frieren", &filters).await.unwrap();
    catalog.search("frieren", &filters).await.unwrap();
    assert_eq!(catalog.client().search_calls.load(Ordering::SeqCst), 2);
    assert!(catalog.cache().is_empty().await);

    assert_eq!(catalog.by_id("154587").await.unwrap().id, "154587");
}

#[test]
fn test_media_serializes_camel_case() {
    let mut media = Media::new("21", "One Piece");
    media.release_year = Some(1999);

    let json = serde_json::to_value(&media).unwrap();
    assert_eq!(json["releaseYear"], 1999);
    assert!(json.get("nativeTitle").is_none());
}
