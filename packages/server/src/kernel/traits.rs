// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Pipeline stages are functions that consume these traits, which keeps
// every external service swappable in tests.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt expecting JSON response (returns raw JSON string)
    /// Parse with the pipeline's JSON extractor in calling code
    async fn complete_json(&self, prompt: &str) -> Result<String> {
        // Default implementation calls complete
        self.complete(prompt).await
    }
}

// =============================================================================
// Quota Gate Trait (Infrastructure - external subscription collaborator)
// =============================================================================

/// What the quota/auth gate decided before any paid work starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotaDecision {
    Allowed,
    Denied {
        message: String,
        upgrade_url: String,
        benefits: Vec<String>,
    },
}

/// Pre-flight quota/auth check. Must be consulted before the pipeline
/// spends any provider budget; a denial is terminal and non-retryable.
#[async_trait]
pub trait BaseQuotaGate: Send + Sync {
    async fn check(&self, user_id: &str) -> Result<QuotaDecision>;
}

// =============================================================================
// Plan Store Trait (Infrastructure - append-only persistence sink)
// =============================================================================

/// One stored plan record. Regeneration inserts a new record, never an
/// in-place update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub id: uuid::Uuid,
    pub user_id: String,
    pub channel_name: String,
    pub topic: String,
    pub plan: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Append-only persistence sink. Insert failures are logged and swallowed
/// by the caller; they never change the HTTP result.
#[async_trait]
pub trait BasePlanStore: Send + Sync {
    async fn insert(&self, record: PlanRecord) -> Result<()>;
}
