// crates/cache/src/lib.rs
//! Response caching for catalog listings
//!
//! [`ResponseCache`] memoizes expensive aggregate calls for a fixed lifetime;
//! [`CachedCatalog`] puts it in front of a [`CatalogClient`] for the trending
//! and seasonal listings.

mod cache;
mod catalog;
mod key;

pub use cache::{CacheEntry, ResponseCache};
pub use catalog::{CachedCatalog, CatalogClient, Media, MediaPage, SearchFilters};
pub use key::{CacheKey, Season};
