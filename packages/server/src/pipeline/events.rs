//! Stage 2: event discovery.
//!
//! Searches the research providers for recent developments in the niche,
//! then asks the model to extract 8-12 dated events naming concrete
//! entities from the results. Entity realness is enforced only by prompt
//! instruction and shape validation; there is no independent fact-check.
//! Failure at either step is a value (`success: false`), never an error.

use serde::Deserialize;

use crate::kernel::traits::BaseAI;
use crate::pipeline::json::extract_json;
use crate::pipeline::prompts::{build_event_query, format_events_prompt};
use crate::pipeline::types::{Event, EventDigest};
use research::{ProviderTier, SearchOptions, SearchOrchestrator};

#[derive(Deserialize)]
struct EventsResponse {
    events: Vec<Event>,
}

/// Discover recent, real events for a niche.
pub async fn find_events(
    ai: &dyn BaseAI,
    searcher: &SearchOrchestrator,
    niche: &str,
    sub_categories: &[String],
    timeframe: &str,
) -> EventDigest {
    let query = build_event_query(niche, sub_categories, timeframe);
    let options = SearchOptions::new().with_max_results(10);
    let response = searcher.search(&query, &options).await;

    if !response.success {
        tracing::warn!(niche, "event discovery has no search results; skipping extraction");
        return EventDigest::empty(ProviderTier::None);
    }

    let provider = response.provider;
    let summary = response.summary.clone();
    let prompt = format_events_prompt(niche, &response);

    match ai.complete_json(&prompt).await {
        Ok(raw) => match extract_json::<EventsResponse>(&raw) {
            Ok(parsed) if !parsed.events.is_empty() => {
                let events: Vec<Event> = parsed
                    .events
                    .into_iter()
                    .filter(|e| !e.title.trim().is_empty() && !e.date.trim().is_empty())
                    .collect();
                tracing::info!(niche, count = events.len(), "extracted events");
                EventDigest {
                    success: !events.is_empty(),
                    events,
                    provider,
                    summary,
                }
            }
            Ok(_) => {
                tracing::warn!(niche, "event extraction returned zero events");
                EventDigest::empty(provider)
            }
            Err(e) => {
                tracing::warn!(niche, error = %e, "event extraction parse failed");
                EventDigest::empty(provider)
            }
        },
        Err(e) => {
            tracing::warn!(niche, error = %e, "event extraction call failed");
            EventDigest::empty(provider)
        }
    }
}
