//! Top-level plan generation: the pipeline state machine.
//!
//! Stages run strictly in order, each writing a progress checkpoint on
//! entry: INITIALIZING -> ANALYZING -> RESEARCH -> GENERATING ->
//! VALIDATING (only with events) -> ENRICHING -> COMPLETED. Later stages
//! consume earlier output, so there is no intra-pipeline parallelism.
//!
//! Degradation policy: every internal failure falls back rather than
//! failing the request. The generation step substitutes the static
//! fallback plan on any network, parse, or missing-key failure. Only the
//! quota gate, duplicate detection, cancellation, and the wall-clock
//! ceiling produce errors.

use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::kernel::progress::PipelineStage;
use crate::kernel::traits::{PlanRecord, QuotaDecision};
use crate::kernel::ServerDeps;
use crate::pipeline::error::GenerationError;
use crate::pipeline::json::extract_json;
use crate::pipeline::prompts::format_generate_prompt;
use crate::pipeline::types::{
    ActionPlan, ChannelSnapshot, ContentIdea, ContentTemplate, EquipmentItem, EstimatedResults,
    NicheProfile, PlanMetadata, SuccessMetrics, WeekPlan,
};
use crate::pipeline::{enrich, events, fallback, niche, validate};

/// One generation request, already authenticated at the route.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub user_id: String,
    /// Caller-supplied, unique per logical request.
    pub session_id: String,
    pub channel_name: String,
    pub topic: String,
    pub channel: ChannelSnapshot,
}

/// Model output before metadata is attached. Counts are validated, not
/// trusted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDraft {
    #[serde(default)]
    strategy: String,
    #[serde(default)]
    timeline: String,
    #[serde(default)]
    estimated_results: EstimatedResults,
    weekly_plan: Vec<WeekPlan>,
    content_templates: Vec<ContentTemplate>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    equipment: Vec<EquipmentItem>,
    #[serde(default)]
    success_metrics: SuccessMetrics,
    #[serde(default)]
    content_ideas: Vec<ContentIdea>,
    #[serde(default)]
    competitor_analysis: Option<String>,
    #[serde(default)]
    monetization_strategy: Option<String>,
}

/// Orchestrates the four stages over injected dependencies.
pub struct PlanGenerator {
    deps: ServerDeps,
    /// Hard ceiling for one whole pipeline run.
    timeout: Duration,
}

/// Awaits a stage future unless the caller cancels first.
macro_rules! stage {
    ($cancel:expr, $future:expr) => {
        tokio::select! {
            biased;
            _ = $cancel.cancelled() => return Err(GenerationError::Cancelled),
            value = $future => value,
        }
    };
}

impl PlanGenerator {
    pub fn new(deps: ServerDeps, timeout: Duration) -> Self {
        Self { deps, timeout }
    }

    /// Run the full pipeline. Total on the success path: any internal
    /// failure still yields a structurally valid plan.
    pub async fn generate(
        &self,
        request: GenerateRequest,
        cancel: CancellationToken,
    ) -> Result<ActionPlan, GenerationError> {
        // Pre-flight gate: no paid work before this passes.
        match self
            .deps
            .quota
            .check(&request.user_id)
            .await
            .map_err(GenerationError::GateFailure)?
        {
            QuotaDecision::Allowed => {}
            QuotaDecision::Denied {
                message,
                upgrade_url,
                benefits,
            } => {
                self.deps.progress.update(
                    &request.session_id,
                    PipelineStage::Failed,
                    "Plan limit reached",
                );
                return Err(GenerationError::QuotaExceeded {
                    message,
                    upgrade_url,
                    benefits,
                });
            }
        }

        // Reject a second identical request while one is in flight.
        let _guard = self
            .deps
            .inflight
            .begin(&request.user_id, &request.channel_name, &request.topic)
            .ok_or(GenerationError::DuplicateRequest)?;

        match tokio::time::timeout(self.timeout, self.run(&request, &cancel)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    session = %request.session_id,
                    timeout_secs = self.timeout.as_secs(),
                    "pipeline exceeded wall-clock ceiling"
                );
                Err(GenerationError::Timeout)
            }
        }
    }

    async fn run(
        &self,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<ActionPlan, GenerationError> {
        let progress = &self.deps.progress;
        let session = &request.session_id;

        progress.update(session, PipelineStage::Initializing, "Starting generation");

        progress.update(session, PipelineStage::Analyzing, "Analyzing your channel");
        let profile = stage!(cancel, niche::classify(self.deps.ai.as_ref(), &request.channel));
        tracing::info!(session, niche = %profile.niche, "channel classified");

        progress.update(
            session,
            PipelineStage::Research,
            format!("Researching recent {} events", profile.niche),
        );
        let digest = stage!(
            cancel,
            events::find_events(
                self.deps.ai.as_ref(),
                &self.deps.searcher,
                &profile.niche,
                &profile.sub_categories,
                "12 months",
            )
        );

        progress.update(session, PipelineStage::Generating, "Generating your action plan");
        let draft = stage!(cancel, self.generate_draft(request, &profile, &digest));
        let mut plan = match draft {
            Some(plan) => plan,
            None => {
                tracing::warn!(session, "generation failed; substituting static fallback plan");
                fallback::fallback_plan(&profile.niche, &request.topic)
            }
        };

        if !digest.events.is_empty() {
            progress.update(session, PipelineStage::Validating, "Grounding ideas in real events");
            plan.content_ideas = stage!(
                cancel,
                validate::validate(
                    self.deps.ai.as_ref(),
                    std::mem::take(&mut plan.content_ideas),
                    &digest.events,
                    &profile.niche,
                )
            );
        }

        progress.update(session, PipelineStage::Enriching, "Filling in the details");
        plan = stage!(cancel, enrich::enrich(self.deps.ai.as_ref(), plan, &profile.niche));

        // Attribution is attached whichever path produced the plan.
        plan.metadata = PlanMetadata {
            detected_niche: profile.niche.clone(),
            real_events_used: digest.events.len(),
            search_provider: digest.provider.as_str().to_string(),
            generated_at: Utc::now(),
        };

        self.persist(request, &plan).await;

        progress.update(session, PipelineStage::Completed, "Your action plan is ready");
        Ok(plan)
    }

    /// The generation call proper. None on any failure; the caller
    /// substitutes the fallback.
    async fn generate_draft(
        &self,
        request: &GenerateRequest,
        profile: &NicheProfile,
        digest: &crate::pipeline::types::EventDigest,
    ) -> Option<ActionPlan> {
        let prompt =
            format_generate_prompt(profile, &request.topic, &request.channel, &digest.events);

        let raw = match self.deps.ai.complete_json(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "plan generation call failed");
                return None;
            }
        };

        let draft: PlanDraft = match extract_json(&raw) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, "plan generation parse failed");
                return None;
            }
        };

        // Required structure; anything else is a failed attempt.
        if draft.weekly_plan.len() != 4 || draft.content_templates.len() != 3 {
            tracing::warn!(
                weeks = draft.weekly_plan.len(),
                templates = draft.content_templates.len(),
                "plan draft has wrong structural counts"
            );
            return None;
        }

        // Equipment is coerced rather than rejected: pad from the static
        // list or truncate to exactly five.
        let mut equipment = draft.equipment;
        if equipment.len() != 5 {
            let reserve = fallback::fallback_plan(&profile.niche, &request.topic).equipment;
            for item in reserve {
                if equipment.len() >= 5 {
                    break;
                }
                if !equipment.iter().any(|e| e.item == item.item) {
                    equipment.push(item);
                }
            }
            equipment.truncate(5);
        }

        Some(ActionPlan {
            strategy: draft.strategy,
            timeline: if draft.timeline.is_empty() {
                "90 days".to_string()
            } else {
                draft.timeline
            },
            estimated_results: draft.estimated_results,
            weekly_plan: draft.weekly_plan,
            content_templates: draft.content_templates,
            keywords: draft.keywords,
            equipment,
            success_metrics: draft.success_metrics,
            content_ideas: draft.content_ideas,
            competitor_analysis: draft.competitor_analysis,
            monetization_strategy: draft.monetization_strategy,
            metadata: PlanMetadata {
                detected_niche: profile.niche.clone(),
                real_events_used: 0,
                search_provider: "none".to_string(),
                generated_at: Utc::now(),
            },
        })
    }

    /// Single insert into the append-only sink. Failure is logged and
    /// swallowed; the caller still gets their plan.
    async fn persist(&self, request: &GenerateRequest, plan: &ActionPlan) {
        let record = PlanRecord {
            id: uuid::Uuid::new_v4(),
            user_id: request.user_id.clone(),
            channel_name: request.channel_name.clone(),
            topic: request.topic.clone(),
            plan: serde_json::to_value(plan).unwrap_or_default(),
            created_at: Utc::now(),
        };
        if let Err(e) = self.deps.plans.insert(record).await {
            tracing::error!(error = %e, "failed to persist plan; returning it anyway");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::testing::{AllowAllQuota, DenyQuota, MemoryPlanStore, MockAI};
    use research::{MockProvider, ProviderTier, SearchOrchestrator};
    use std::sync::Arc;

    fn request() -> GenerateRequest {
        GenerateRequest {
            user_id: "user-1".to_string(),
            session_id: "session-1".to_string(),
            channel_name: "CodeLab".to_string(),
            topic: "ai coding tools".to_string(),
            channel: ChannelSnapshot::new("CodeLab"),
        }
    }

    fn deps(ai: MockAI, searcher: SearchOrchestrator) -> ServerDeps {
        ServerDeps::new(
            Arc::new(ai),
            Arc::new(searcher),
            Arc::new(AllowAllQuota),
            Arc::new(MemoryPlanStore::new()),
        )
    }

    fn failing_searcher() -> SearchOrchestrator {
        SearchOrchestrator::new(vec![
            Arc::new(MockProvider::new(ProviderTier::Tavily).with_failure("down")),
            Arc::new(MockProvider::new(ProviderTier::Serper).with_failure("down")),
            Arc::new(MockProvider::new(ProviderTier::Brave).with_failure("down")),
        ])
    }

    #[tokio::test]
    async fn total_upstream_failure_still_returns_complete_plan() {
        // Every AI call errors and every provider is down
        let deps = deps(MockAI::new(), failing_searcher());
        let generator = PlanGenerator::new(deps.clone(), Duration::from_secs(30));

        let plan = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(plan.weekly_plan.len(), 4);
        assert_eq!(plan.content_templates.len(), 3);
        assert_eq!(plan.equipment.len(), 5);
        assert_eq!(plan.metadata.real_events_used, 0);
        assert_eq!(plan.metadata.search_provider, "none");
        assert_eq!(plan.metadata.detected_niche, "Content Creation");

        let progress = deps.progress.read("session-1").unwrap();
        assert_eq!(progress.percent, 100);
    }

    #[tokio::test]
    async fn fallback_is_idempotent_across_invocations() {
        let deps = deps(MockAI::new(), failing_searcher());
        let generator = PlanGenerator::new(deps, Duration::from_secs(30));

        let a = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap();
        let mut second = request();
        second.session_id = "session-2".to_string();
        let b = generator
            .generate(second, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&a.weekly_plan).unwrap(),
            serde_json::to_value(&b.weekly_plan).unwrap()
        );
        assert_eq!(a.strategy, b.strategy);
    }

    #[tokio::test]
    async fn quota_denial_is_terminal_and_spends_nothing() {
        let ai = MockAI::new();
        let provider = Arc::new(
            MockProvider::new(ProviderTier::Tavily)
                .with_results(&[("T", "https://a.com", "s")]),
        );
        let searcher = SearchOrchestrator::new(vec![provider.clone()]);
        let deps = ServerDeps::new(
            Arc::new(ai),
            Arc::new(searcher),
            Arc::new(DenyQuota),
            Arc::new(MemoryPlanStore::new()),
        );
        let generator = PlanGenerator::new(deps, Duration::from_secs(30));

        let error = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, GenerationError::QuotaExceeded { .. }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_request_is_rejected() {
        // Hold an inflight slot for the same (user, channel, topic)
        let deps = deps(MockAI::new(), failing_searcher());
        let _slot = deps
            .inflight
            .begin("user-1", "CodeLab", "ai coding tools")
            .unwrap();
        let generator = PlanGenerator::new(deps, Duration::from_secs(30));

        let error = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, GenerationError::DuplicateRequest));
    }

    #[tokio::test]
    async fn cancellation_stops_work_silently() {
        let deps = deps(MockAI::new(), failing_searcher());
        let generator = PlanGenerator::new(deps, Duration::from_secs(30));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = generator.generate(request(), cancel).await.unwrap_err();
        assert!(matches!(error, GenerationError::Cancelled));
    }

    #[tokio::test]
    async fn model_plan_with_wrong_counts_uses_fallback() {
        // Model answers, but with only 2 weeks
        let ai = MockAI::new().with_response(
            "Create a 90-day action plan",
            r#"{"weeklyPlan": [{"week":1,"theme":"a","tasks":[]},{"week":2,"theme":"b","tasks":[]}],
                "contentTemplates": [{"type":"t","title":"x"},{"type":"t","title":"y"},{"type":"t","title":"z"}]}"#,
        );
        let deps = deps(ai, failing_searcher());
        let generator = PlanGenerator::new(deps, Duration::from_secs(30));

        let plan = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(plan.weekly_plan.len(), 4);
    }

    #[tokio::test]
    async fn exceeding_wall_clock_ceiling_times_out() {
        // The model hangs far past the ceiling; the run must fail with
        // Timeout rather than degrade to the fallback plan
        let ai = MockAI::new().with_delay(Duration::from_secs(30));
        let deps = deps(ai, failing_searcher());
        let generator = PlanGenerator::new(deps, Duration::from_millis(100));

        let error = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, GenerationError::Timeout));
    }

    #[tokio::test]
    async fn persistence_failure_still_returns_plan() {
        let store = Arc::new(MemoryPlanStore::failing());
        let deps = ServerDeps::new(
            Arc::new(MockAI::new()),
            Arc::new(failing_searcher()),
            Arc::new(AllowAllQuota),
            store.clone(),
        );
        let generator = PlanGenerator::new(deps, Duration::from_secs(30));

        let plan = generator
            .generate(request(), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(plan.weekly_plan.len(), 4);
        assert_eq!(store.insert_attempts(), 1);
        assert!(store.records().is_empty());
    }
}
