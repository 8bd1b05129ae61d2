//! Tiered search orchestration.
//!
//! Providers are tried in strict priority order. The first success is
//! returned immediately; lower tiers are never invoked once a higher one
//! answers, and results from different tiers are never merged. This is a
//! cost-control ladder, not load balancing: one paid call at a time.
//!
//! When every tier fails the orchestrator does not error. It returns the
//! degraded `SearchResponse::none`, letting downstream stages run without
//! grounding results instead of aborting the whole pipeline.

use std::sync::Arc;

use crate::provider::ResearchProvider;
use crate::types::{SearchOptions, SearchResponse};

/// Tries ordered research providers until one succeeds.
pub struct SearchOrchestrator {
    providers: Vec<Arc<dyn ResearchProvider>>,
}

impl SearchOrchestrator {
    /// Build from providers in priority order (index 0 tried first).
    pub fn new(providers: Vec<Arc<dyn ResearchProvider>>) -> Self {
        Self { providers }
    }

    /// Orchestrator with no tiers; every search degrades. Useful in tests
    /// and when no provider keys are configured.
    pub fn empty() -> Self {
        Self { providers: Vec::new() }
    }

    /// How many tiers are configured.
    pub fn tier_count(&self) -> usize {
        self.providers.len()
    }

    /// Run one search through the fallback ladder. Never errors.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> SearchResponse {
        for provider in &self.providers {
            let tier = provider.tier();
            match provider.search(query, options).await {
                Ok(hit) if !hit.results.is_empty() => {
                    tracing::debug!(
                        provider = tier.as_str(),
                        results = hit.results.len(),
                        "search succeeded"
                    );
                    return SearchResponse::from_hit(query, tier, hit);
                }
                Ok(_) => {
                    tracing::warn!(provider = tier.as_str(), "provider returned no results");
                }
                Err(e) => {
                    tracing::warn!(provider = tier.as_str(), error = %e, "provider failed");
                }
            }
        }

        tracing::warn!(query, "all search providers failed");
        SearchResponse::none(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use crate::types::ProviderTier;

    fn rows() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![("Title", "https://example.com/a", "snippet text")]
    }

    #[tokio::test]
    async fn first_tier_success_short_circuits() {
        let a = Arc::new(MockProvider::new(ProviderTier::Tavily).with_results(&rows()));
        let b = Arc::new(MockProvider::new(ProviderTier::Serper).with_results(&rows()));
        let c = Arc::new(MockProvider::new(ProviderTier::Brave).with_results(&rows()));
        let orchestrator =
            SearchOrchestrator::new(vec![a.clone(), b.clone(), c.clone()]);

        let response = orchestrator.search("q", &SearchOptions::default()).await;

        assert!(response.success);
        assert_eq!(response.provider, ProviderTier::Tavily);
        assert_eq!(a.call_count(), 1);
        assert_eq!(b.call_count(), 0);
        assert_eq!(c.call_count(), 0);
    }

    #[tokio::test]
    async fn failure_falls_through_in_order() {
        let a = Arc::new(MockProvider::new(ProviderTier::Tavily).with_failure("401"));
        let b = Arc::new(MockProvider::new(ProviderTier::Serper).with_failure("timeout"));
        let c = Arc::new(MockProvider::new(ProviderTier::Brave).with_results(&rows()));
        let orchestrator =
            SearchOrchestrator::new(vec![a.clone(), b.clone(), c.clone()]);

        let response = orchestrator.search("q", &SearchOptions::default()).await;

        assert!(response.success);
        assert_eq!(response.provider, ProviderTier::Brave);
        assert_eq!(a.call_count(), 1);
        assert_eq!(b.call_count(), 1);
        assert_eq!(c.call_count(), 1);
    }

    #[tokio::test]
    async fn all_failures_return_degraded_response() {
        let a = Arc::new(MockProvider::new(ProviderTier::Tavily).with_failure("down"));
        let b = Arc::new(MockProvider::new(ProviderTier::Serper).with_failure("down"));
        let c = Arc::new(MockProvider::new(ProviderTier::Brave).with_failure("down"));
        let orchestrator = SearchOrchestrator::new(vec![a, b, c]);

        let response = orchestrator.search("q", &SearchOptions::default()).await;

        assert!(!response.success);
        assert_eq!(response.provider, ProviderTier::None);
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn empty_hit_counts_as_failure() {
        let a = Arc::new(MockProvider::new(ProviderTier::Tavily).with_results(&[]));
        let b = Arc::new(MockProvider::new(ProviderTier::Serper).with_results(&rows()));
        let orchestrator = SearchOrchestrator::new(vec![a, b.clone()]);

        let response = orchestrator.search("q", &SearchOptions::default()).await;

        assert!(response.success);
        assert_eq!(response.provider, ProviderTier::Serper);
        assert_eq!(b.call_count(), 1);
    }

    #[tokio::test]
    async fn no_tiers_degrades() {
        let orchestrator = SearchOrchestrator::empty();
        let response = orchestrator.search("q", &SearchOptions::default()).await;
        assert!(!response.success);
    }
}
