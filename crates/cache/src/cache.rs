// crates/cache/src/cache.rs
//! Time-boxed in-memory response cache

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// A cached value and the moment it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: Instant,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
        }
    }

    /// Fresh while strictly younger than `ttl`
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() < ttl
    }
}

/// One entry per key, evicted only by age
///
/// Entries are replaced wholesale after a successful fetch. The lock is never
/// held while fetching, so two callers missing the same key at once may both
/// fetch; the later write wins.
#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached value if fresh, otherwise fetches and stores it
    ///
    /// A failed fetch leaves any stale entry in place and propagates the error.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(data) = self.get(key, ttl).await {
            log::debug!("Cache hit for '{}'", key);
            return Ok(data);
        }

        log::debug!("Cache miss for '{}', fetching", key);
        let data = fetch().await?;

        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry::new(data.clone()));
        Ok(data)
    }

    /// Fresh value for `key`, if any
    pub async fn get(&self, key: &str, ttl: Duration) -> Option<T> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(ttl))
            .map(|entry| entry.data.clone())
    }

    /// Drops the entry for `key`, returning whether one existed
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, stale ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_entry_freshness_boundary() {
        let entry = CacheEntry::new(1);
        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(entry.is_fresh(TTL));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!entry.is_fresh(TTL));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_ignores_stale() {
        let cache = ResponseCache::new();
        cache
            .get_or_fetch("k", TTL, || async { Ok::<_, ()>(7) })
            .await
            .unwrap();
        assert_eq!(cache.get("k", TTL).await, Some(7));

        tokio::time::advance(TTL).await;
        assert_eq!(cache.get("k", TTL).await, None);
        // stale entries still occupy their slot until replaced
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = ResponseCache::new();
        for key in ["a", "b"] {
            cache
                .get_or_fetch(key, TTL, move || async move { Ok::<_, ()>(key.len()) })
                .await
                .unwrap();
        }

        assert!(cache.invalidate("a").await);
        assert!(!cache.invalidate("a").await);
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
