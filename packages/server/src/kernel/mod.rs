//! Infrastructure layer: service traits, clients, and shared runtime state.

pub mod ai;
pub mod collaborators;
pub mod deps;
pub mod inflight;
pub mod progress;
pub mod testing;
pub mod traits;

pub use ai::OpenAiClient;
pub use collaborators::{FreeTierQuotaGate, MemoryPlanStore};
pub use deps::ServerDeps;
pub use inflight::{InflightGuard, InflightRegistry};
pub use progress::{PipelineStage, ProgressChannel, ProgressState};
pub use traits::{BaseAI, BasePlanStore, BaseQuotaGate, PlanRecord, QuotaDecision};
