//! LLM prompts for the plan-generation pipeline.
//!
//! Structural counts (4 weeks of 5 tasks, 3 templates, 5 equipment items)
//! are embedded directly in the prompts to bound output size and keep the
//! responses parseable.

use crate::pipeline::types::{ChannelSnapshot, ContentIdea, Event, NicheProfile};
use research::SearchResponse;

/// Structured niche classification, the first rung of the ladder.
pub const CLASSIFY_PROMPT: &str = r#"Classify this creator channel into a specific content niche.

Output JSON only:
{
    "broadCategory": "one of: Technology, Gaming, Education, Lifestyle, Entertainment, Business, Health, General",
    "specificNiche": "2-5 word niche, e.g. 'AI Tool Reviews'",
    "subCategories": ["2-4 narrower sub-topics"],
    "confidence": "high" | "medium" | "low",
    "reasoning": "one sentence"
}

Channel:
{channel}"#;

/// Bare-string classification, the second rung.
pub const CLASSIFY_SIMPLE_PROMPT: &str = r#"In 2-5 words, name the content niche of this channel. Reply with the niche only, no punctuation or explanation.

Channel:
{channel}"#;

/// Structured event extraction from search results.
pub const EVENTS_PROMPT: &str = r#"From the search results below, extract 8-12 REAL recent events relevant to the "{niche}" niche.

Rules:
- Every event must name concrete entities (products, companies, people) that appear in the results.
- Dates are "YYYY-MM". Do not invent events that are not supported by the results.

Output JSON only:
{
    "events": [
        {
            "title": "short event title",
            "date": "YYYY-MM",
            "description": "1-2 sentences",
            "entities": ["named entities involved"],
            "videoAngle": "how a creator could cover this",
            "estimatedViews": "e.g. 10K-50K"
        }
    ]
}

Search summary:
{summary}

Search results:
{results}"#;

/// Cross-reference generated ideas against discovered events.
pub const VALIDATE_IDEAS_PROMPT: &str = r#"Cross-check these content ideas for a "{niche}" channel against the known real events below. Replace generic or templated ideas with ones grounded in a specific event, and keep ideas that already reference a real event.

Output JSON only:
{
    "ideas": [
        {
            "title": "...",
            "hook": "...",
            "description": "...",
            "estimatedViews": "...",
            "basedOnEvent": "event title this idea is grounded in, or null",
            "specifics": "concrete names, dates, numbers from the event, or null"
        }
    ]
}

Known events:
{events}

Ideas to validate:
{ideas}"#;

/// Fill one missing template/equipment field.
pub const ENRICH_FIELD_PROMPT: &str = r#"For a "{niche}" creator channel, write a one-sentence value for the field "{field}" of {subject}. Reply with the sentence only."#;

/// Full plan generation.
pub const GENERATE_PLAN_PROMPT: &str = r#"Create a 90-day action plan for a "{niche}" channel targeting the topic "{topic}".

Output JSON only, with EXACTLY this structure:
{
    "strategy": "2-3 sentence growth strategy",
    "timeline": "90 days",
    "estimatedResults": {"views": "...", "subscribers": "...", "revenue": "..."},
    "weeklyPlan": [
        {"week": 1, "theme": "...", "tasks": [{"id": "w1t1", "task": "...", "priority": "high"}]}
    ],
    "contentTemplates": [
        {"type": "...", "title": "...", "format": "...", "hook": "...", "structure": "...", "duration": "..."}
    ],
    "keywords": ["8-12 SEO keywords"],
    "equipment": [{"item": "...", "purpose": "...", "essential": true, "budget": "..."}],
    "successMetrics": {"week1": "...", "week2": "...", "week3": "...", "week4": "..."},
    "contentIdeas": [
        {"title": "...", "hook": "...", "description": "...", "estimatedViews": "..."}
    ],
    "competitorAnalysis": "2-3 sentences",
    "monetizationStrategy": "2-3 sentences"
}

Counts are fixed: weeklyPlan has EXACTLY 4 weeks with EXACTLY 5 tasks each, contentTemplates has EXACTLY 3 entries, equipment has EXACTLY 5 entries, contentIdeas has 5-8 entries.

Channel context:
{channel}

Real recent events to ground content ideas in (use their entities and dates):
{events}"#;

/// Render a channel snapshot into prompt text.
pub fn format_channel(channel: &ChannelSnapshot) -> String {
    format!(
        "Name: {}\nDescription: {}\nSubscribers: {}\nTotal views: {}\nVideos: {}\nRecent videos:\n{}",
        channel.name,
        channel.description,
        channel.subscriber_count,
        channel.view_count,
        channel.video_count,
        channel
            .recent_videos
            .iter()
            .map(|v| format!("- {}", v))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

pub fn format_classify_prompt(channel: &ChannelSnapshot) -> String {
    CLASSIFY_PROMPT.replace("{channel}", &format_channel(channel))
}

pub fn format_classify_simple_prompt(channel: &ChannelSnapshot) -> String {
    CLASSIFY_SIMPLE_PROMPT.replace("{channel}", &format_channel(channel))
}

pub fn format_events_prompt(niche: &str, response: &SearchResponse) -> String {
    let results_text = response
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "[{}] {} ({}{})\n{}",
                i + 1,
                r.title,
                r.source,
                r.date
                    .as_deref()
                    .map(|d| format!(", {}", d))
                    .unwrap_or_default(),
                r.snippet,
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n");

    EVENTS_PROMPT
        .replace("{niche}", niche)
        .replace("{summary}", &response.summary)
        .replace("{results}", &results_text)
}

pub fn format_validate_prompt(niche: &str, ideas: &[ContentIdea], events: &[Event]) -> String {
    let events_text = events
        .iter()
        .map(|e| format!("- {} ({}): {}", e.title, e.date, e.description))
        .collect::<Vec<_>>()
        .join("\n");
    let ideas_json = serde_json::to_string_pretty(ideas).unwrap_or_default();

    VALIDATE_IDEAS_PROMPT
        .replace("{niche}", niche)
        .replace("{events}", &events_text)
        .replace("{ideas}", &ideas_json)
}

pub fn format_enrich_prompt(niche: &str, field: &str, subject: &str) -> String {
    ENRICH_FIELD_PROMPT
        .replace("{niche}", niche)
        .replace("{field}", field)
        .replace("{subject}", subject)
}

pub fn format_generate_prompt(
    profile: &NicheProfile,
    topic: &str,
    channel: &ChannelSnapshot,
    events: &[Event],
) -> String {
    let events_text = if events.is_empty() {
        "(no verified events available; use evergreen angles)".to_string()
    } else {
        events
            .iter()
            .map(|e| {
                format!(
                    "- {} ({}): {} [entities: {}]",
                    e.title,
                    e.date,
                    e.description,
                    e.entities.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    GENERATE_PLAN_PROMPT
        .replace("{niche}", &profile.niche)
        .replace("{topic}", topic)
        .replace("{channel}", &format_channel(channel))
        .replace("{events}", &events_text)
}

/// Search query for event discovery: niche plus sub-categories plus
/// recency terms covering the current and prior year.
pub fn build_event_query(niche: &str, sub_categories: &[String], timeframe: &str) -> String {
    let year = chrono::Utc::now().format("%Y").to_string();
    let prior: i32 = year.parse::<i32>().unwrap_or(2025) - 1;
    let subs = if sub_categories.is_empty() {
        String::new()
    } else {
        format!(" {}", sub_categories.join(" "))
    };
    format!(
        "{}{} latest news developments announcements {} {} past {}",
        niche, subs, year, prior, timeframe
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_query_includes_years_and_subcategories() {
        let query = build_event_query(
            "AI Tool Reviews",
            &["coding assistants".to_string()],
            "12 months",
        );
        let year = chrono::Utc::now().format("%Y").to_string();
        assert!(query.contains("AI Tool Reviews"));
        assert!(query.contains("coding assistants"));
        assert!(query.contains(&year));
        assert!(query.contains("12 months"));
    }

    #[test]
    fn generate_prompt_embeds_counts() {
        let profile = NicheProfile::default_profile();
        let channel = ChannelSnapshot::new("CodeLab");
        let prompt = format_generate_prompt(&profile, "AI tools", &channel, &[]);
        assert!(prompt.contains("EXACTLY 4 weeks"));
        assert!(prompt.contains("EXACTLY 3 entries"));
        assert!(prompt.contains("EXACTLY 5 entries"));
        assert!(prompt.contains("no verified events"));
    }
}
