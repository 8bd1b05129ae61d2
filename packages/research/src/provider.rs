//! Research provider trait.
//!
//! Each external search/research service gets one adapter implementing
//! this trait. Adapters do exactly three things: issue the network call,
//! surface transport/auth failures as `ProviderError`, and map the
//! provider-specific schema into the canonical `SearchResult` list plus a
//! human-readable summary. Schema knowledge stops here.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{ProviderError, ProviderResult};
use crate::types::{ProviderHit, ProviderTier, SearchOptions, SearchResult};

/// One tier of the research fallback ladder.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Which tier this adapter is, for attribution in responses.
    fn tier(&self) -> ProviderTier;

    /// Run one search. Errors cause the orchestrator to fall through to
    /// the next tier; they are never retried here.
    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<ProviderHit>;
}

/// Scripted provider for tests.
///
/// Counts calls so ordering invariants ("tier B got zero calls") can be
/// asserted, and pops scripted outcomes in order, repeating the last one.
pub struct MockProvider {
    tier: ProviderTier,
    outcomes: RwLock<Vec<MockOutcome>>,
    calls: AtomicUsize,
}

enum MockOutcome {
    Hit(ProviderHit),
    Fail(String),
}

impl MockProvider {
    pub fn new(tier: ProviderTier) -> Self {
        Self {
            tier,
            outcomes: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script a successful response built from (title, url, snippet) rows.
    pub fn with_results(self, rows: &[(&str, &str, &str)]) -> Self {
        let results: Vec<SearchResult> = rows
            .iter()
            .enumerate()
            .map(|(i, (title, url, snippet))| {
                SearchResult::new(*title, *url)
                    .with_snippet(*snippet)
                    .with_source(crate::types::source_from_url(url))
                    .with_relevance(crate::types::relevance_from_rank(i))
            })
            .collect();
        let total = results.len();
        self.outcomes.write().unwrap().push(MockOutcome::Hit(ProviderHit {
            summary: format!("{} mock results", total),
            results,
            total,
        }));
        self
    }

    /// Script a failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .push(MockOutcome::Fail(message.to_string()));
        self
    }

    /// How many times `search` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResearchProvider for MockProvider {
    fn tier(&self) -> ProviderTier {
        self.tier
    }

    async fn search(&self, _query: &str, _options: &SearchOptions) -> ProviderResult<ProviderHit> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let outcomes = self.outcomes.read().unwrap();
        if outcomes.is_empty() {
            return Err(ProviderError::MissingCredentials);
        }
        let outcome = &outcomes[call.min(outcomes.len() - 1)];
        match outcome {
            MockOutcome::Hit(hit) => Ok(hit.clone()),
            MockOutcome::Fail(message) => Err(ProviderError::Status {
                code: 500,
                body: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_counts_calls() {
        let provider = MockProvider::new(ProviderTier::Tavily)
            .with_results(&[("A", "https://a.com", "first")]);

        assert_eq!(provider.call_count(), 0);
        let hit = provider.search("q", &SearchOptions::default()).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(hit.results.len(), 1);
        assert_eq!(hit.results[0].source, "a.com");
    }

    #[tokio::test]
    async fn mock_provider_pops_outcomes_in_order() {
        let provider = MockProvider::new(ProviderTier::Serper)
            .with_failure("rate limited")
            .with_results(&[("B", "https://b.com", "second")]);

        assert!(provider.search("q", &SearchOptions::default()).await.is_err());
        assert!(provider.search("q", &SearchOptions::default()).await.is_ok());
        // Last outcome repeats
        assert!(provider.search("q", &SearchOptions::default()).await.is_ok());
    }
}
