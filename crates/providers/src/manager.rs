// crates/providers/src/manager.rs
//! Ordered failover across providers
//!
//! Providers are tried strictly one after another in priority order. Each
//! provider's call is wrapped in the retry policy; the first non-empty (and,
//! for streams, validated) answer wins. When every provider fails the caller
//! gets one `PROVIDERS_UNAVAILABLE` error and the individual failures are
//! logged.
//!
//! The overall timeout is a deadline shared by the whole chain. Each provider
//! gets an equal share of whatever time is left, so one slow upstream cannot
//! use up the budget before the backups are asked. Running out of time counts
//! as every remaining provider failing.

use crate::adapter::HttpProvider;
use crate::resolver::{IdResolver, IdentityResolver, StaticIdResolver};
use crate::traits::{ProviderMetadata, StreamingProvider};
use crate::validator::SourceValidator;
use animeradar_config::{BackoffKind, Config, RetryConfig};
use animeradar_core::{
    Episode, EpisodePage, ErrorInfo, ProviderFailure, ProviderResult, Result, StreamingData,
};
use animeradar_network::{Client, ClientConfig, NetworkResult};
use animeradar_resilience::{
    with_cancellation, with_retry, with_timeout, Backoff, CancellationToken, RetryPolicy,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const DEFAULT_PAGE_SIZE: usize = 50;

/// Builds a [`RetryPolicy`] from its config section
pub fn retry_policy_from(config: &RetryConfig) -> RetryPolicy {
    let backoff = match config.backoff {
        BackoffKind::Linear => Backoff::Linear,
        BackoffKind::Exponential => Backoff::Exponential {
            multiplier: config.multiplier,
        },
    };
    RetryPolicy::new(config.max_attempts)
        .with_base_delay(config.base_delay())
        .with_max_delay(config.max_delay())
        .with_backoff(backoff)
}

/// Resolves episodes and streams across an ordered set of providers
pub struct ProviderManager {
    providers: Vec<Arc<dyn StreamingProvider>>,
    retry: RetryPolicy,
    validator: SourceValidator,
    resolver: Box<dyn IdResolver>,
    failover_delay: Duration,
    overall_timeout: Duration,
    page_size: usize,
}

impl ProviderManager {
    pub fn builder() -> ProviderManagerBuilder {
        ProviderManagerBuilder::default()
    }

    /// Production wiring: built-in HTTP adapters in configured order
    ///
    /// Unknown provider names are skipped with a warning. When the config
    /// carries an ID map, mapped IDs are translated and everything else is
    /// passed through unchanged.
    pub fn from_config(config: &Config) -> NetworkResult<Self> {
        let streaming = &config.streaming;
        let client = Client::with_config(ClientConfig {
            timeout: streaming.request_timeout(),
            user_agent: config.app.user_agent.clone(),
            ..ClientConfig::default()
        })?;

        let mut builder = Self::builder();
        for name in &streaming.providers {
            match HttpProvider::builtin(name, streaming.base_url(name), client.clone()) {
                Some(provider) => builder = builder.with_provider(provider),
                None => log::warn!("Unknown provider '{}' in config, skipping", name),
            }
        }

        let validator = if streaming.validate_sources {
            SourceValidator::new(client).with_timeout(streaming.probe_timeout())
        } else {
            SourceValidator::disabled()
        };

        builder = builder
            .retry_policy(retry_policy_from(&config.retry))
            .validator(validator)
            .failover_delay(streaming.failover_delay())
            .overall_timeout(streaming.overall_timeout())
            .page_size(streaming.page_size);

        if !streaming.id_map.is_empty() {
            builder = builder.resolver(
                StaticIdResolver::from(streaming.id_map.as_slice()).with_passthrough(true),
            );
        }

        Ok(builder.build())
    }

    /// Provider names in priority order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn metadata(&self) -> Vec<ProviderMetadata> {
        self.providers.iter().map(|p| p.metadata()).collect()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// One page of an anime's episodes from the first provider that has them
    pub async fn get_episodes(&self, anime_id: &str, page: usize) -> Result<EpisodePage> {
        self.get_episodes_cancellable(anime_id, page, &CancellationToken::new())
            .await
    }

    pub async fn get_episodes_cancellable(
        &self,
        anime_id: &str,
        page: usize,
        token: &CancellationToken,
    ) -> Result<EpisodePage> {
        let result = self.resolve_episodes_cancellable(anime_id, token).await?;
        Ok(EpisodePage::paginate(result.data, page, self.page_size).with_provider(result.provider))
    }

    /// The complete episode list, with the provider that supplied it
    pub async fn resolve_episodes(&self, anime_id: &str) -> Result<ProviderResult<Vec<Episode>>> {
        self.resolve_episodes_cancellable(anime_id, &CancellationToken::new())
            .await
    }

    pub async fn resolve_episodes_cancellable(
        &self,
        anime_id: &str,
        token: &CancellationToken,
    ) -> Result<ProviderResult<Vec<Episode>>> {
        let work = self.failover("episodes", anime_id, |provider, id| async move {
            let episodes = provider.get_episodes(&id).await?;
            if episodes.is_empty() {
                return Err(ErrorInfo::not_found(format!(
                    "{}: no episodes found",
                    provider.name()
                )));
            }
            Ok(episodes)
        });
        self.bounded(token, work).await
    }

    /// Validated sources for one episode, best quality first
    pub async fn get_streaming_sources(&self, episode_id: &str) -> Result<StreamingData> {
        self.get_streaming_sources_cancellable(episode_id, &CancellationToken::new())
            .await
    }

    pub async fn get_streaming_sources_cancellable(
        &self,
        episode_id: &str,
        token: &CancellationToken,
    ) -> Result<StreamingData> {
        let validator = &self.validator;
        let work = self.failover("sources", episode_id, |provider, id| async move {
            let data = provider.get_streaming_sources(&id).await?;
            if data.sources.is_empty() {
                return Err(ErrorInfo::not_found(format!(
                    "{}: no streaming sources found",
                    provider.name()
                )));
            }
            validator.validate(data).await
        });

        let result = self.bounded(token, work).await?;
        let mut data = result.data.with_provider(result.provider);
        data.sort_sources();
        Ok(data)
    }

    /// Applies the caller's cancellation token
    async fn bounded<T, F>(&self, token: &CancellationToken, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match with_cancellation(token, work).await {
            Ok(result) => result,
            Err(_) => {
                log::info!("Request cancelled by caller");
                Err(ErrorInfo::timeout("request cancelled"))
            }
        }
    }

    async fn failover<T, F, Fut>(&self, operation: &str, id: &str, call: F) -> Result<ProviderResult<T>>
    where
        F: Fn(Arc<dyn StreamingProvider>, String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let deadline = Instant::now() + self.overall_timeout;
        let mut failures: Vec<ProviderFailure> = Vec::new();
        let mut attempted = false;

        for (index, provider) in self.providers.iter().enumerate() {
            let name = provider.name().to_string();

            let Some(upstream_id) = self.resolver.resolve(&name, id) else {
                log::warn!("{}: no {} mapping for '{}', skipping", name, operation, id);
                failures.push(ProviderFailure::new(
                    name,
                    ErrorInfo::not_found(format!("no mapping for '{}'", id)),
                ));
                continue;
            };

            if attempted && !self.failover_delay.is_zero() {
                if deadline.saturating_duration_since(Instant::now()) <= self.failover_delay {
                    log::warn!("Overall timeout of {:?} reached", self.overall_timeout);
                    break;
                }
                tokio::time::sleep(self.failover_delay).await;
            }
            attempted = true;

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                log::warn!("Overall timeout of {:?} reached", self.overall_timeout);
                break;
            }
            let share = remaining / (self.providers.len() - index) as u32;

            log::info!(
                "Trying {} for {} '{}' (up to {:?})",
                name,
                operation,
                upstream_id,
                share
            );
            let attempts = with_retry(&self.retry, ErrorInfo::is_retryable, || {
                call(Arc::clone(provider), upstream_id.clone())
            });
            let outcome = match with_timeout(share, attempts).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ErrorInfo::timeout(format!(
                    "{}: no answer within {:?}",
                    name, share
                ))),
            };

            match outcome {
                Ok(data) => {
                    log::info!("{} answered {} '{}'", name, operation, upstream_id);
                    let earlier = failures.last().map(|f| f.error.clone());
                    return Ok(ProviderResult::new(data, name).with_error(earlier));
                }
                Err(error) => {
                    log::warn!("{} failed {} '{}': {}", name, operation, upstream_id, error);
                    failures.push(ProviderFailure::new(name, error));
                }
            }
        }

        log::error!(
            "All providers failed {} '{}' ({} tried)",
            operation,
            id,
            failures.len()
        );
        for failure in &failures {
            log::error!("  {}", failure);
        }

        Err(ErrorInfo::providers_unavailable(format!(
            "all {} providers failed to resolve {} for '{}'",
            self.providers.len(),
            operation,
            id
        )))
    }
}

/// Assembles a [`ProviderManager`] from explicit parts
///
/// Defaults: no providers, the default retry policy, validation disabled,
/// identity ID resolution, 1 s failover delay, 30 s overall timeout and 50
/// episodes per page.
pub struct ProviderManagerBuilder {
    providers: Vec<Arc<dyn StreamingProvider>>,
    retry: RetryPolicy,
    validator: SourceValidator,
    resolver: Box<dyn IdResolver>,
    failover_delay: Duration,
    overall_timeout: Duration,
    page_size: usize,
}

impl Default for ProviderManagerBuilder {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            retry: RetryPolicy::default(),
            validator: SourceValidator::disabled(),
            resolver: Box::new(IdentityResolver),
            failover_delay: Duration::from_secs(1),
            overall_timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProviderManagerBuilder {
    /// Appends a provider at the lowest priority so far
    pub fn with_provider(self, provider: impl StreamingProvider + 'static) -> Self {
        self.with_shared_provider(Arc::new(provider))
    }

    pub fn with_shared_provider(mut self, provider: Arc<dyn StreamingProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn validator(mut self, validator: SourceValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn resolver(mut self, resolver: impl IdResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn failover_delay(mut self, delay: Duration) -> Self {
        self.failover_delay = delay;
        self
    }

    pub fn overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = timeout;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn build(self) -> ProviderManager {
        ProviderManager {
            providers: self.providers,
            retry: self.retry,
            validator: self.validator,
            resolver: self.resolver,
            failover_delay: self.failover_delay,
            overall_timeout: self.overall_timeout,
            page_size: self.page_size,
        }
    }
}
