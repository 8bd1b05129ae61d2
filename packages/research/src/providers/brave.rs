//! Brave Search adapter (tier C).

use async_trait::async_trait;
use serde::Deserialize;

use crate::credentials::SecretString;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::ResearchProvider;
use crate::types::{
    relevance_from_rank, source_from_url, ProviderHit, ProviderTier, SearchOptions, SearchResult,
};

const BRAVE_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Brave Search API client.
pub struct BraveProvider {
    api_key: SecretString,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    title: String,
    url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    age: Option<String>,
}

impl BraveProvider {
    pub fn new(api_key: impl Into<String>) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::Http(Box::new(e)))?;

        Ok(Self {
            api_key: SecretString::new(api_key),
            client,
        })
    }
}

#[async_trait]
impl ResearchProvider for BraveProvider {
    fn tier(&self) -> ProviderTier {
        ProviderTier::Brave
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<ProviderHit> {
        let response = self
            .client
            .get(BRAVE_URL)
            .query(&[("q", query), ("count", &options.max_results.to_string())])
            .header("X-Subscription-Token", self.api_key.expose())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(Box::new(e)))?;
        let parsed: BraveResponse = serde_json::from_str(&body)?;

        let results: Vec<SearchResult> = parsed
            .web
            .map(|w| w.results)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(rank, r)| {
                let mut result = SearchResult::new(r.title, r.url.clone())
                    .with_snippet(r.description.unwrap_or_default())
                    .with_source(source_from_url(&r.url))
                    .with_relevance(relevance_from_rank(rank));
                if let Some(age) = r.age {
                    result = result.with_date(age);
                }
                result
            })
            .collect();

        let summary = results
            .iter()
            .take(3)
            .map(|r| r.snippet.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ProviderHit {
            total: results.len(),
            results,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brave_missing_web_section_maps_to_empty() {
        let parsed: BraveResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.web.is_none());
    }

    #[test]
    fn brave_results_decode() {
        let raw = r#"{"web": {"results": [
            {"title": "T", "url": "https://c.com/z", "description": "d", "age": "2 days ago"}
        ]}}"#;
        let parsed: BraveResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.web.unwrap().results.len(), 1);
    }
}
