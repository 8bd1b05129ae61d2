//! Serper adapter (tier B).
//!
//! Serper proxies Google results; it reports rank but no score, so
//! relevance is derived from position.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::SecretString;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::ResearchProvider;
use crate::types::{
    relevance_from_rank, source_from_url, ProviderHit, ProviderTier, SearchOptions, SearchResult,
};

const SERPER_URL: &str = "https://google.serper.dev/search";

/// Serper API client.
pub struct SerperProvider {
    api_key: SecretString,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SerperRequest {
    q: String,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    title: String,
    link: String,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl SerperProvider {
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
impl ResearchProvider for SerperProvider {
    fn tier(&self) -> ProviderTier {
        ProviderTier::Serper
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<ProviderHit> {
        let request = SerperRequest {
            q: query.to_string(),
            num: options.max_results,
        };

        let response = self
            .client
            .post(SERPER_URL)
            .header("X-API-KEY", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
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
        let parsed: SerperResponse = serde_json::from_str(&body)?;

        let results: Vec<SearchResult> = parsed
            .organic
            .into_iter()
            .enumerate()
            .map(|(rank, r)| {
                let mut result = SearchResult::new(r.title, r.link.clone())
                    .with_snippet(r.snippet.unwrap_or_default())
                    .with_source(source_from_url(&r.link))
                    .with_relevance(relevance_from_rank(rank));
                if let Some(date) = r.date {
                    result = result.with_date(date);
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
    fn serper_rank_becomes_relevance() {
        let raw = r#"{
            "organic": [
                {"title": "First", "link": "https://a.com/x", "snippet": "one"},
                {"title": "Second", "link": "https://b.com/y", "snippet": "two", "date": "Nov 3, 2025"}
            ]
        }"#;
        let parsed: SerperResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.organic.len(), 2);
        assert_eq!(parsed.organic[1].date.as_deref(), Some("Nov 3, 2025"));
    }
}
