//! In-process implementations of the external collaborator seams.
//!
//! The real subscription service and plan database live outside this
//! system; these stand-ins keep the seams honest for development and
//! tests while the host wires its own implementations in production.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::kernel::traits::{BasePlanStore, BaseQuotaGate, PlanRecord, QuotaDecision};

/// In-memory append-only plan store.
#[derive(Default)]
pub struct MemoryPlanStore {
    records: RwLock<Vec<PlanRecord>>,
    fail: bool,
    inserts: AtomicUsize,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts always error, for testing the
    /// log-and-swallow persistence policy.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<PlanRecord> {
        self.records.read().unwrap().clone()
    }

    pub fn count_for_user(&self, user_id: &str) -> usize {
        self.records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .count()
    }

    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BasePlanStore for MemoryPlanStore {
    async fn insert(&self, record: PlanRecord) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("sink unavailable"));
        }
        self.records.write().unwrap().push(record);
        Ok(())
    }
}

/// Quota gate backed by stored plan counts: free-tier users get a fixed
/// number of plans, then a denial with an upgrade call-to-action.
pub struct FreeTierQuotaGate {
    store: Arc<MemoryPlanStore>,
    free_limit: usize,
    upgrade_url: String,
}

impl FreeTierQuotaGate {
    pub fn new(store: Arc<MemoryPlanStore>, free_limit: usize) -> Self {
        Self {
            store,
            free_limit,
            upgrade_url: "/pricing".to_string(),
        }
    }

    pub fn with_upgrade_url(mut self, url: impl Into<String>) -> Self {
        self.upgrade_url = url.into();
        self
    }
}

#[async_trait]
impl BaseQuotaGate for FreeTierQuotaGate {
    async fn check(&self, user_id: &str) -> Result<QuotaDecision> {
        if self.store.count_for_user(user_id) >= self.free_limit {
            return Ok(QuotaDecision::Denied {
                message: format!(
                    "The free plan includes {} action plan. Upgrade to generate more.",
                    self.free_limit
                ),
                upgrade_url: self.upgrade_url.clone(),
                benefits: vec![
                    "Unlimited action plans".to_string(),
                    "Event research on every generation".to_string(),
                    "Plan regeneration and remixing".to_string(),
                ],
            });
        }
        Ok(QuotaDecision::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(user: &str) -> PlanRecord {
        PlanRecord {
            id: uuid::Uuid::new_v4(),
            user_id: user.to_string(),
            channel_name: "C".to_string(),
            topic: "t".to_string(),
            plan: serde_json::json!({}),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn free_tier_denies_after_limit() {
        let store = Arc::new(MemoryPlanStore::new());
        store.insert(record("user-1")).await.unwrap();
        let gate = FreeTierQuotaGate::new(store, 1);

        match gate.check("user-1").await.unwrap() {
            QuotaDecision::Denied { benefits, .. } => assert!(!benefits.is_empty()),
            QuotaDecision::Allowed => panic!("expected denial"),
        }
        assert!(matches!(
            gate.check("user-2").await.unwrap(),
            QuotaDecision::Allowed
        ));
    }

    #[tokio::test]
    async fn failing_store_rejects_inserts_but_counts_attempts() {
        let store = MemoryPlanStore::failing();
        assert!(store.insert(record("u")).await.is_err());
        assert_eq!(store.insert_attempts(), 1);
        assert!(store.records().is_empty());
    }
}
