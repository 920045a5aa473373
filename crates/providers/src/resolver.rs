// crates/providers/src/resolver.rs
//! Translation of caller IDs into each provider's own ID space

use animeradar_config::IdMapping;
use std::collections::HashMap;

/// Maps a caller-facing ID to the ID a given provider understands
///
/// Returning `None` means the provider cannot serve this ID; the orchestrator
/// records that as `NOT_FOUND` and moves on.
pub trait IdResolver: Send + Sync {
    fn resolve(&self, provider: &str, id: &str) -> Option<String>;
}

/// Hands every provider the caller's ID unchanged
///
/// Only correct when all configured providers share one ID space, which in
/// practice means a single provider or several fronts of the same backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl IdResolver for IdentityResolver {
    fn resolve(&self, _provider: &str, id: &str) -> Option<String> {
        Some(id.to_string())
    }
}

/// Explicit `(provider, id) -> upstream id` table
#[derive(Debug, Clone, Default)]
pub struct StaticIdResolver {
    entries: HashMap<(String, String), String>,
    passthrough: bool,
}

impl StaticIdResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        provider: impl Into<String>,
        id: impl Into<String>,
        upstream_id: impl Into<String>,
    ) {
        self.entries
            .insert((provider.into(), id.into()), upstream_id.into());
    }

    /// Unmapped IDs are passed through unchanged instead of skipped
    pub fn with_passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&[IdMapping]> for StaticIdResolver {
    fn from(mappings: &[IdMapping]) -> Self {
        let mut resolver = Self::new();
        for m in mappings {
            resolver.insert(m.provider.clone(), m.id.clone(), m.upstream_id.clone());
        }
        resolver
    }
}

impl IdResolver for StaticIdResolver {
    fn resolve(&self, provider: &str, id: &str) -> Option<String> {
        self.entries
            .get(&(provider.to_string(), id.to_string()))
            .cloned()
            .or_else(|| self.passthrough.then(|| id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(IdentityResolver.resolve("zoro", "abc"), Some("abc".to_string()));
    }

    #[test]
    fn test_static_lookup() {
        let mut resolver = StaticIdResolver::new();
        resolver.insert("animepahe", "21", "4");

        assert_eq!(resolver.resolve("animepahe", "21"), Some("4".to_string()));
        assert_eq!(resolver.resolve("zoro", "21"), None);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_passthrough() {
        let resolver = StaticIdResolver::new().with_passthrough(true);
        assert_eq!(resolver.resolve("zoro", "21"), Some("21".to_string()));
    }

    #[test]
    fn test_from_config_table() {
        let mappings = vec![IdMapping {
            provider: "animefox".to_string(),
            id: "one-piece".to_string(),
            upstream_id: "1204".to_string(),
        }];

        let resolver = StaticIdResolver::from(mappings.as_slice());
        assert_eq!(
            resolver.resolve("animefox", "one-piece"),
            Some("1204".to_string())
        );
    }
}
