// crates/providers/src/lib.rs
//! Streaming providers and the failover orchestrator
//!
//! - [`HttpProvider`] talks to one upstream API described by a
//!   [`ProviderProfile`] and maps its payloads into the shared model
//! - [`SourceValidator`] probes resolved URLs and drops dead ones
//! - [`ProviderManager`] tries providers in priority order with retries,
//!   validation and an overall deadline
//!
//! # Example
//!
//! ```rust,no_run
//! use animeradar_config::Config;
//! use animeradar_providers::ProviderManager;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ProviderManager::from_config(&Config::default())?;
//! let page = manager.get_episodes("naruto", 1).await?;
//! println!("{} episodes from {:?}", page.total, page.provider);
//! # Ok(())
//! # }
//! ```

mod adapter;
mod manager;
mod mapping;
mod profile;
mod resolver;
mod traits;
mod validator;

pub use adapter::HttpProvider;
pub use manager::{retry_policy_from, ProviderManager, ProviderManagerBuilder};
pub use mapping::{parse_episodes, parse_streaming_data};
pub use profile::{ProviderProfile, ResponseShape, UpstreamRequest};
pub use resolver::{IdResolver, IdentityResolver, StaticIdResolver};
pub use traits::{ProviderMetadata, StreamingProvider};
pub use validator::{SourceProbe, SourceValidator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_exported() {
        let client = animeradar_network::Client::new().expect("client");
        for name in animeradar_config::KNOWN_PROVIDERS {
            assert!(HttpProvider::builtin(name, None, client.clone()).is_some());
        }
    }
}
