//! The plan-generation pipeline.
//!
//! Four dependent stages over unreliable external calls:
//! - [`niche`] - channel classification with a two-level parse ladder
//! - [`events`] - real-event discovery via the research orchestrator
//! - [`validate`] - grounding generated ideas in discovered events
//! - [`enrich`] - per-item fill of missing plan fields
//!
//! [`generator`] composes them into the checkpointed state machine;
//! [`fallback`] guarantees a structurally valid result on every path.

pub mod enrich;
pub mod error;
pub mod events;
pub mod fallback;
pub mod generator;
pub mod json;
pub mod niche;
pub mod prompts;
pub mod types;
pub mod validate;

pub use error::GenerationError;
pub use fallback::fallback_plan;
pub use generator::{GenerateRequest, PlanGenerator};
pub use json::{extract_json, extract_json_str};
pub use types::{
    ActionPlan, ChannelSnapshot, Confidence, ContentIdea, ContentTemplate, EquipmentItem,
    Event, EventDigest, NicheProfile, PlanMetadata, WeekPlan, WeekTask,
};
