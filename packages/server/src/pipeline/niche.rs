//! Stage 1: niche classification.
//!
//! Two-level degradation ladder, independent of the provider ladder in
//! the research crate: rich structured parse, then a bare-string
//! re-prompt, then a hard-coded default. Never returns an error and
//! never returns partial fields.

use serde::Deserialize;

use crate::kernel::traits::BaseAI;
use crate::pipeline::json::extract_json;
use crate::pipeline::prompts::{format_classify_prompt, format_classify_simple_prompt};
use crate::pipeline::types::{ChannelSnapshot, Confidence, NicheProfile};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyResponse {
    broad_category: String,
    specific_niche: String,
    #[serde(default)]
    sub_categories: Vec<String>,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    reasoning: String,
}

/// Classify a channel into a niche profile.
pub async fn classify(ai: &dyn BaseAI, channel: &ChannelSnapshot) -> NicheProfile {
    // Rung 1: full structured classification
    match ai.complete_json(&format_classify_prompt(channel)).await {
        Ok(raw) => match extract_json::<ClassifyResponse>(&raw) {
            Ok(parsed) if !parsed.specific_niche.trim().is_empty() => {
                return NicheProfile {
                    niche: parsed.specific_niche.trim().to_string(),
                    broad_category: parsed.broad_category,
                    sub_categories: parsed.sub_categories,
                    confidence: parse_confidence(parsed.confidence.as_deref()),
                    reasoning: parsed.reasoning,
                };
            }
            Ok(_) => tracing::warn!("structured classification returned empty niche"),
            Err(e) => tracing::warn!(error = %e, "structured classification parse failed"),
        },
        Err(e) => tracing::warn!(error = %e, "structured classification call failed"),
    }

    // Rung 2: bare short-string re-prompt
    match ai.complete(&format_classify_simple_prompt(channel)).await {
        Ok(raw) => {
            let niche = raw.trim().trim_matches('"').to_string();
            if !niche.is_empty() && niche.split_whitespace().count() <= 8 {
                return NicheProfile {
                    niche,
                    broad_category: "General".to_string(),
                    sub_categories: Vec::new(),
                    confidence: Confidence::Low,
                    reasoning: "Simplified classification".to_string(),
                };
            }
            tracing::warn!("simplified classification returned unusable text");
        }
        Err(e) => tracing::warn!(error = %e, "simplified classification call failed"),
    }

    // Rung 3: static default
    NicheProfile::default_profile()
}

fn parse_confidence(value: Option<&str>) -> Confidence {
    match value.map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("high") => Confidence::High,
        Some("medium") => Confidence::Medium,
        _ => Confidence::Low,
    }
}
