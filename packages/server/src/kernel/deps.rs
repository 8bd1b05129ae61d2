//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to the pipeline and routes. All
//! external services sit behind trait objects so tests can substitute
//! in-process mocks; nothing here is a global singleton.

use std::sync::Arc;

use research::SearchOrchestrator;

use crate::kernel::inflight::InflightRegistry;
use crate::kernel::progress::ProgressChannel;
use crate::kernel::traits::{BaseAI, BasePlanStore, BaseQuotaGate};

/// Everything one generation run needs.
#[derive(Clone)]
pub struct ServerDeps {
    /// LLM client for all generation/extraction calls.
    pub ai: Arc<dyn BaseAI>,
    /// Tiered research orchestrator.
    pub searcher: Arc<SearchOrchestrator>,
    /// Pre-flight quota/auth gate (external collaborator).
    pub quota: Arc<dyn BaseQuotaGate>,
    /// Append-only plan persistence sink (external collaborator).
    pub plans: Arc<dyn BasePlanStore>,
    /// Poll-readable progress store.
    pub progress: Arc<ProgressChannel>,
    /// De-dup of concurrent identical requests.
    pub inflight: InflightRegistry,
}

impl ServerDeps {
    pub fn new(
        ai: Arc<dyn BaseAI>,
        searcher: Arc<SearchOrchestrator>,
        quota: Arc<dyn BaseQuotaGate>,
        plans: Arc<dyn BasePlanStore>,
    ) -> Self {
        Self {
            ai,
            searcher,
            quota,
            plans,
            progress: Arc::new(ProgressChannel::new()),
            inflight: InflightRegistry::new(),
        }
    }
}
