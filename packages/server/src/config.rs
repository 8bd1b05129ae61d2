use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_model: String,
    pub tavily_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub brave_api_key: Option<String>,
    /// Wall-clock ceiling for one whole generation run, in seconds.
    pub pipeline_timeout_secs: u64,
    /// Plans included in the free tier before the quota gate denies.
    pub free_tier_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            tavily_api_key: env::var("TAVILY_API_KEY").ok(),
            serper_api_key: env::var("SERPER_API_KEY").ok(),
            brave_api_key: env::var("BRAVE_API_KEY").ok(),
            pipeline_timeout_secs: env::var("PIPELINE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "180".to_string())
                .parse()
                .context("PIPELINE_TIMEOUT_SECS must be a valid number")?,
            free_tier_limit: env::var("FREE_TIER_LIMIT")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("FREE_TIER_LIMIT must be a valid number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_openai_key_is_an_error() {
        // Only assert the contract when the environment doesn't carry a key
        if env::var("OPENAI_API_KEY").is_err() {
            assert!(Config::from_env().is_err());
        }
    }
}
