//! Tavily adapter (tier A).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::SecretString;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::ResearchProvider;
use crate::types::{source_from_url, ProviderHit, ProviderTier, SearchOptions, SearchResult};

const TAVILY_URL: &str = "https://api.tavily.com/search";

/// Tavily API client.
pub struct TavilyProvider {
    api_key: SecretString,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TavilyRequest {
    query: String,
    search_depth: String,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: String,
    url: String,
    content: String,
    score: f64,
    #[serde(default)]
    published_date: Option<String>,
}

impl TavilyProvider {
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
impl ResearchProvider for TavilyProvider {
    fn tier(&self) -> ProviderTier {
        ProviderTier::Tavily
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<ProviderHit> {
        let request = TavilyRequest {
            query: query.to_string(),
            search_depth: "basic".to_string(),
            max_results: options.max_results,
            include_answer: true,
            include_raw_content: options.include_content,
        };

        let response = self
            .client
            .post(TAVILY_URL)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
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
        let parsed: TavilyResponse = serde_json::from_str(&body)?;

        let results: Vec<SearchResult> = parsed
            .results
            .into_iter()
            .map(|r| {
                let mut result = SearchResult::new(r.title, r.url.clone())
                    .with_snippet(r.content)
                    .with_source(source_from_url(&r.url))
                    .with_relevance(r.score);
                if let Some(date) = r.published_date {
                    result = result.with_date(date);
                }
                result
            })
            .collect();

        let summary = parsed.answer.unwrap_or_else(|| {
            results
                .iter()
                .take(3)
                .map(|r| r.snippet.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        });

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
    fn tavily_response_maps_to_canonical_shape() {
        let raw = r#"{
            "answer": "AI tooling moved fast this year.",
            "results": [
                {"title": "Launch", "url": "https://news.example.com/launch",
                 "content": "A major launch.", "score": 0.92,
                 "published_date": "2025-11-02"}
            ]
        }"#;
        let parsed: TavilyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.answer.as_deref(), Some("AI tooling moved fast this year."));
        assert_eq!(parsed.results[0].score, 0.92);
    }
}
