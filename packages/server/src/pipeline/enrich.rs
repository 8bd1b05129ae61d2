//! Stage 4: field enrichment.
//!
//! Fills template and equipment fields the generator left missing or set
//! to the literal sentinel "undefined". One AI attempt per item, no
//! retries; a failed item falls back to a deterministic templated value
//! and never aborts enrichment of the remaining items.

use crate::kernel::traits::BaseAI;
use crate::pipeline::prompts::format_enrich_prompt;
use crate::pipeline::types::ActionPlan;

/// Missing or the literal placeholder some models emit.
fn needs_fill(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("undefined")
}

/// Fill gaps in `plan`'s content templates and equipment list.
pub async fn enrich(ai: &dyn BaseAI, mut plan: ActionPlan, niche: &str) -> ActionPlan {
    for template in &mut plan.content_templates {
        if needs_fill(&template.hook) {
            template.hook = fill_field(
                ai,
                niche,
                "hook",
                &format!("the content template \"{}\"", template.title),
                format!("Attention-grabbing opener for {} viewers", niche),
            )
            .await;
        }
        if needs_fill(&template.structure) {
            template.structure = fill_field(
                ai,
                niche,
                "structure",
                &format!("the content template \"{}\"", template.title),
                "Intro, three main segments, recap with call to action".to_string(),
            )
            .await;
        }
    }

    for equipment in &mut plan.equipment {
        if needs_fill(&equipment.purpose) {
            equipment.purpose = fill_field(
                ai,
                niche,
                "purpose",
                &format!("the equipment item \"{}\"", equipment.item),
                format!("Essential for {} content production", niche),
            )
            .await;
        }
    }

    plan
}

/// One attempt, then the deterministic fallback.
async fn fill_field(
    ai: &dyn BaseAI,
    niche: &str,
    field: &str,
    subject: &str,
    fallback: String,
) -> String {
    match ai.complete(&format_enrich_prompt(niche, field, subject)).await {
        Ok(text) => {
            let cleaned = text.trim().trim_matches('"').to_string();
            if cleaned.is_empty() {
                fallback
            } else {
                cleaned
            }
        }
        Err(e) => {
            tracing::warn!(field, subject, error = %e, "enrichment call failed; using template value");
            fallback
        }
    }
}
