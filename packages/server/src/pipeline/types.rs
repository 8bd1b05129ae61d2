//! Data types for the plan-generation pipeline.
//!
//! Wire shapes serialize camelCase to match the HTTP contract. The
//! `ActionPlan` is total: every required field is populated on every path,
//! including the static fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel data supplied by the caller (the metadata fetcher itself is an
/// external collaborator; we only consume its records).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnapshot {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recent_videos: Vec<String>,
    #[serde(default)]
    pub subscriber_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub video_count: u64,
}

impl ChannelSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Classifier confidence, lowest wins on degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Output of niche classification. Always fully populated; the classifier
/// degrades to static defaults rather than returning partial fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheProfile {
    pub niche: String,
    pub broad_category: String,
    pub sub_categories: Vec<String>,
    pub confidence: Confidence,
    pub reasoning: String,
}

impl NicheProfile {
    /// Hard-coded default, the bottom of the classification ladder.
    pub fn default_profile() -> Self {
        Self {
            niche: "Content Creation".to_string(),
            broad_category: "General".to_string(),
            sub_categories: Vec::new(),
            confidence: Confidence::Low,
            reasoning: "Classification unavailable; using general defaults".to_string(),
        }
    }
}

/// A real-world, dated occurrence discovered from search results.
/// Produced only by event discovery, never fabricated elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    /// YYYY-MM.
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub video_angle: String,
    #[serde(default)]
    pub estimated_views: String,
}

/// A content idea, optionally grounded in a discovered event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdea {
    pub title: String,
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_views: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifics: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTask {
    pub id: String,
    pub task: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    pub week: u8,
    pub theme: String,
    pub tasks: Vec<WeekTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    #[serde(rename = "type")]
    pub template_type: String,
    pub title: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub structure: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub item: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub essential: bool,
    #[serde(default)]
    pub budget: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedResults {
    pub views: String,
    pub subscribers: String,
    pub revenue: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMetrics {
    pub week1: String,
    pub week2: String,
    pub week3: String,
    pub week4: String,
}

/// Attribution attached to every plan regardless of which path produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub detected_niche: String,
    pub real_events_used: usize,
    pub search_provider: String,
    pub generated_at: DateTime<Utc>,
}

/// The finished action plan.
///
/// Structural invariants: exactly 4 weekly plans, exactly 3 content
/// templates, exactly 5 equipment items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub strategy: String,
    pub timeline: String,
    pub estimated_results: EstimatedResults,
    pub weekly_plan: Vec<WeekPlan>,
    pub content_templates: Vec<ContentTemplate>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub equipment: Vec<EquipmentItem>,
    pub success_metrics: SuccessMetrics,
    #[serde(default)]
    pub content_ideas: Vec<ContentIdea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monetization_strategy: Option<String>,
    pub metadata: PlanMetadata,
}

/// The outcome of event discovery. Failure is a value, not an error, so
/// the generator can proceed without grounding events.
#[derive(Debug, Clone)]
pub struct EventDigest {
    pub success: bool,
    pub events: Vec<Event>,
    pub provider: research::ProviderTier,
    pub summary: String,
}

impl EventDigest {
    pub fn empty(provider: research::ProviderTier) -> Self {
        Self {
            success: false,
            events: Vec::new(),
            provider,
            summary: String::new(),
        }
    }
}
