// Creator Plan API Core
//
// Turns a channel plus a target topic into a structured 90-day action
// plan, grounded in recent real-world events fetched through the tiered
// research orchestrator. The pipeline degrades stage by stage instead of
// failing: callers always receive a structurally valid plan.

pub mod config;
pub mod kernel;
pub mod pipeline;
pub mod server;

pub use config::Config;
