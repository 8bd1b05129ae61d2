//! Canonical search types.
//!
//! Every provider's response is mapped into these shapes at the adapter
//! boundary. Nothing past the adapter layer knows which provider answered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which provider tier produced a response.
///
/// Tiers are tried in declaration order; `None` marks the fully degraded
/// all-tiers-failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTier {
    Tavily,
    Serper,
    Brave,
    None,
}

impl ProviderTier {
    /// Stable string form, used in plan metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderTier::Tavily => "tavily",
            ProviderTier::Serper => "serper",
            ProviderTier::Brave => "brave",
            ProviderTier::None => "none",
        }
    }
}

/// A single normalized search hit.
///
/// Exactly these fields regardless of which provider produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Hostname or provider-reported source label.
    pub source: String,
    /// Relevance in 0.0..=1.0. Rank-derived when the provider gives none.
    pub relevance: f64,
    /// Publication date if the provider reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: String::new(),
            source: String::new(),
            relevance: 0.5,
            date: None,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = relevance.clamp(0.0, 1.0);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Options for a search invocation.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum results to request from the provider.
    pub max_results: usize,
    /// Ask the provider for full page content where supported.
    pub include_content: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            include_content: false,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_content(mut self, include_content: bool) -> Self {
        self.include_content = include_content;
        self
    }
}

/// What one provider adapter returns on success: normalized results plus
/// a human-readable summary line.
#[derive(Debug, Clone)]
pub struct ProviderHit {
    pub results: Vec<SearchResult>,
    pub summary: String,
    pub total: usize,
}

/// The orchestrator's answer. Never an error.
///
/// Invariant: `success == false` implies `results` is empty and
/// `provider == ProviderTier::None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub provider: ProviderTier,
    pub query: String,
    pub summary: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub timestamp: DateTime<Utc>,
}

impl SearchResponse {
    /// Successful response from one provider tier.
    pub fn from_hit(query: impl Into<String>, provider: ProviderTier, hit: ProviderHit) -> Self {
        Self {
            success: true,
            provider,
            query: query.into(),
            summary: hit.summary,
            total_results: hit.total,
            results: hit.results,
            timestamp: Utc::now(),
        }
    }

    /// Fully degraded response: every tier failed.
    pub fn none(query: impl Into<String>) -> Self {
        Self {
            success: false,
            provider: ProviderTier::None,
            query: query.into(),
            summary: String::new(),
            results: Vec::new(),
            total_results: 0,
            timestamp: Utc::now(),
        }
    }
}

/// Derive a relevance score from a zero-based result rank.
///
/// Providers that report no score get a monotonically decreasing one so
/// ordering survives normalization.
pub(crate) fn relevance_from_rank(rank: usize) -> f64 {
    (1.0 - rank as f64 * 0.05).max(0.1)
}

/// Hostname of a URL, or the URL itself when it does not parse.
pub(crate) fn source_from_url(url: &str) -> String {
    url.split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(url)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_response_invariant() {
        let response = SearchResponse::none("anything");
        assert!(!response.success);
        assert_eq!(response.provider, ProviderTier::None);
        assert!(response.results.is_empty());
        assert_eq!(response.total_results, 0);
    }

    #[test]
    fn relevance_is_clamped() {
        let result = SearchResult::new("t", "https://a.com").with_relevance(1.7);
        assert_eq!(result.relevance, 1.0);
        let result = SearchResult::new("t", "https://a.com").with_relevance(-0.2);
        assert_eq!(result.relevance, 0.0);
    }

    #[test]
    fn rank_relevance_floors() {
        assert_eq!(relevance_from_rank(0), 1.0);
        assert!(relevance_from_rank(3) > relevance_from_rank(4));
        assert_eq!(relevance_from_rank(50), 0.1);
    }

    #[test]
    fn source_from_url_extracts_host() {
        assert_eq!(source_from_url("https://www.theverge.com/ai/1"), "www.theverge.com");
        assert_eq!(source_from_url("not a url"), "not a url");
    }

    #[test]
    fn provider_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProviderTier::Tavily).unwrap(),
            "\"tavily\""
        );
        assert_eq!(serde_json::to_string(&ProviderTier::None).unwrap(), "\"none\"");
    }
}
