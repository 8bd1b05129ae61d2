//! Mock infrastructure implementations for tests.
//!
//! No network, deterministic, with call recording so tests can assert
//! which services were touched and how often.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::RwLock;
use std::time::Duration;

use crate::kernel::traits::{BaseAI, BaseQuotaGate, QuotaDecision};

pub use crate::kernel::collaborators::MemoryPlanStore;

/// A scripted AI: rules are checked in order and the first whose marker
/// appears in the prompt wins. Prompts with no matching rule fail, which
/// is what exercises the degradation ladders.
#[derive(Default)]
pub struct MockAI {
    rules: RwLock<Vec<MockRule>>,
    prompts: RwLock<Vec<String>>,
    delay: RwLock<Option<Duration>>,
}

enum MockRule {
    Respond { marker: String, response: String },
    Fail { marker: String, message: String },
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` to any prompt containing `marker`.
    pub fn with_response(self, marker: &str, response: &str) -> Self {
        self.rules.write().unwrap().push(MockRule::Respond {
            marker: marker.to_string(),
            response: response.to_string(),
        });
        self
    }

    /// Fail any prompt containing `marker`.
    pub fn with_failure(self, marker: &str, message: &str) -> Self {
        self.rules.write().unwrap().push(MockRule::Fail {
            marker: marker.to_string(),
            message: message.to_string(),
        });
        self
    }

    /// Sleep before answering each call, to simulate a slow model.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    /// All prompts seen so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// How many calls were made.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.prompts.write().unwrap().push(prompt.to_string());
        for rule in self.rules.read().unwrap().iter() {
            match rule {
                MockRule::Respond { marker, response } if prompt.contains(marker) => {
                    return Ok(response.clone());
                }
                MockRule::Fail { marker, message } if prompt.contains(marker) => {
                    return Err(anyhow!("{}", message));
                }
                _ => {}
            }
        }
        Err(anyhow!("no scripted response for prompt"))
    }
}

/// Quota gate that always allows.
pub struct AllowAllQuota;

#[async_trait]
impl BaseQuotaGate for AllowAllQuota {
    async fn check(&self, _user_id: &str) -> Result<QuotaDecision> {
        Ok(QuotaDecision::Allowed)
    }
}

/// Quota gate that always denies with an upgrade path, as the external
/// subscription collaborator does for exhausted free tiers.
pub struct DenyQuota;

#[async_trait]
impl BaseQuotaGate for DenyQuota {
    async fn check(&self, _user_id: &str) -> Result<QuotaDecision> {
        Ok(QuotaDecision::Denied {
            message: "Free plan limit reached".to_string(),
            upgrade_url: "/pricing".to_string(),
            benefits: vec![
                "Unlimited action plans".to_string(),
                "Priority research providers".to_string(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_ai_matches_rules_in_order() {
        let ai = MockAI::new()
            .with_failure("classify", "model down")
            .with_response("niche", "Tech Reviews");

        assert!(ai.complete("please classify this").await.is_err());
        assert_eq!(ai.complete("name the niche").await.unwrap(), "Tech Reviews");
        assert_eq!(ai.call_count(), 2);
    }

    #[tokio::test]
    async fn unmatched_prompt_fails() {
        let ai = MockAI::new();
        assert!(ai.complete("anything").await.is_err());
    }
}
