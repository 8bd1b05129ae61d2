//! Minimum inter-call spacing for rate-limited providers.
//!
//! One of the research providers enforces a minimum spacing between calls
//! (at least one second). This wrapper holds each call on a governor rate
//! limiter before delegating, so two calls within the same pipeline run
//! are spaced out explicitly rather than rejected upstream.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;

use crate::error::ProviderResult;
use crate::provider::ResearchProvider;
use crate::types::{ProviderHit, ProviderTier, SearchOptions};

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A provider wrapper that enforces a per-second call quota.
pub struct SpacedProvider<P: ResearchProvider> {
    inner: P,
    limiter: Arc<DirectRateLimiter>,
}

impl<P: ResearchProvider> SpacedProvider<P> {
    /// Wrap with the default 1 request/second spacing.
    pub fn new(provider: P) -> Self {
        Self::with_quota(provider, Quota::per_second(nonzero!(1u32)))
    }

    /// Wrap with a custom quota.
    pub fn with_quota(provider: P, quota: Quota) -> Self {
        Self {
            inner: provider,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl<P: ResearchProvider> ResearchProvider for SpacedProvider<P> {
    fn tier(&self) -> ProviderTier {
        self.inner.tier()
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<ProviderHit> {
        self.limiter.until_ready().await;
        self.inner.search(query, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use std::time::Instant;

    #[tokio::test]
    async fn consecutive_calls_are_spaced_at_least_one_second() {
        let provider = SpacedProvider::new(
            MockProvider::new(ProviderTier::Tavily)
                .with_results(&[("A", "https://a.com", "s")]),
        );
        let options = SearchOptions::default();

        let start = Instant::now();
        provider.search("first", &options).await.unwrap();
        provider.search("second", &options).await.unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed.as_millis() >= 1000,
            "two calls completed in {}ms",
            elapsed.as_millis()
        );
    }

    #[tokio::test]
    async fn single_call_is_not_delayed() {
        let provider = SpacedProvider::new(
            MockProvider::new(ProviderTier::Tavily)
                .with_results(&[("A", "https://a.com", "s")]),
        );

        let start = Instant::now();
        provider
            .search("only", &SearchOptions::default())
            .await
            .unwrap();
        assert!(start.elapsed().as_millis() < 500);
    }
}
