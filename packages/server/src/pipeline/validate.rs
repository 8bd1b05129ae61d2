//! Stage 3: idea validation.
//!
//! Re-prompts the model to cross-reference generated content ideas
//! against the discovered events, replacing generic ideas with
//! event-grounded ones. Any failure returns the original ideas unchanged;
//! this stage never blocks the pipeline.

use serde::Deserialize;

use crate::kernel::traits::BaseAI;
use crate::pipeline::json::extract_json;
use crate::pipeline::prompts::format_validate_prompt;
use crate::pipeline::types::{ContentIdea, Event};

#[derive(Deserialize)]
struct ValidateResponse {
    ideas: Vec<ContentIdea>,
}

/// Cross-check ideas against known events.
pub async fn validate(
    ai: &dyn BaseAI,
    ideas: Vec<ContentIdea>,
    events: &[Event],
    niche: &str,
) -> Vec<ContentIdea> {
    if ideas.is_empty() || events.is_empty() {
        return ideas;
    }

    let prompt = format_validate_prompt(niche, &ideas, events);
    match ai.complete_json(&prompt).await {
        Ok(raw) => match extract_json::<ValidateResponse>(&raw) {
            Ok(parsed) if !parsed.ideas.is_empty() => parsed.ideas,
            Ok(_) => {
                tracing::warn!(niche, "idea validation returned no ideas; keeping originals");
                ideas
            }
            Err(e) => {
                tracing::warn!(niche, error = %e, "idea validation parse failed; keeping originals");
                ideas
            }
        },
        Err(e) => {
            tracing::warn!(niche, error = %e, "idea validation call failed; keeping originals");
            ideas
        }
    }
}
