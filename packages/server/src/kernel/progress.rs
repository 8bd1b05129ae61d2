//! Keyed progress store for polling clients.
//!
//! One logical writer per session id (the owning pipeline run), any number
//! of readers. Percent never regresses within a session: a late or
//! out-of-order write is clamped to the highest value already recorded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Fixed, ordered pipeline stages with their progress waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    Initializing,
    Analyzing,
    Research,
    Generating,
    Validating,
    Enriching,
    Completed,
    Failed,
}

impl PipelineStage {
    /// Checkpoint percent written on entry to this stage.
    pub fn checkpoint(&self) -> u8 {
        match self {
            PipelineStage::Initializing => 0,
            PipelineStage::Analyzing => 20,
            PipelineStage::Research => 40,
            PipelineStage::Generating => 60,
            PipelineStage::Validating => 80,
            PipelineStage::Enriching => 90,
            PipelineStage::Completed => 100,
            // Failure freezes progress where it was
            PipelineStage::Failed => 0,
        }
    }
}

/// Progress of one pipeline run, keyed by caller-supplied session id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub session_id: String,
    pub stage: PipelineStage,
    pub message: String,
    pub percent: u8,
}

/// In-memory progress channel. Entries stay until process restart; a
/// completed or cancelled session is simply stale (last write wins).
#[derive(Default)]
pub struct ProgressChannel {
    states: RwLock<HashMap<String, ProgressState>>,
}

impl ProgressChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage checkpoint. Percent is clamped so it never
    /// decreases for a session.
    pub fn update(&self, session_id: &str, stage: PipelineStage, message: impl Into<String>) {
        self.update_percent(session_id, stage, message, stage.checkpoint());
    }

    /// Record progress with an explicit percent (intermediate jumps
    /// between waypoints).
    pub fn update_percent(
        &self,
        session_id: &str,
        stage: PipelineStage,
        message: impl Into<String>,
        percent: u8,
    ) {
        let mut states = self.states.write().unwrap();
        let floor = states.get(session_id).map(|s| s.percent).unwrap_or(0);
        let percent = percent.min(100).max(floor);
        states.insert(
            session_id.to_string(),
            ProgressState {
                session_id: session_id.to_string(),
                stage,
                message: message.into(),
                percent,
            },
        );
    }

    /// Read the latest state, or None for unknown session ids.
    pub fn read(&self, session_id: &str) -> Option<ProgressState> {
        self.states.read().unwrap().get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_session_is_none() {
        let channel = ProgressChannel::new();
        assert!(channel.read("missing").is_none());
    }

    #[test]
    fn percent_never_regresses() {
        let channel = ProgressChannel::new();
        channel.update("s1", PipelineStage::Generating, "generating");
        assert_eq!(channel.read("s1").unwrap().percent, 60);

        // A late lower write is clamped up
        channel.update("s1", PipelineStage::Analyzing, "late write");
        let state = channel.read("s1").unwrap();
        assert_eq!(state.percent, 60);
        assert_eq!(state.stage, PipelineStage::Analyzing);
    }

    #[test]
    fn success_path_reaches_exactly_100() {
        let channel = ProgressChannel::new();
        let stages = [
            PipelineStage::Initializing,
            PipelineStage::Analyzing,
            PipelineStage::Research,
            PipelineStage::Generating,
            PipelineStage::Validating,
            PipelineStage::Enriching,
            PipelineStage::Completed,
        ];
        let mut last = 0;
        for stage in stages {
            channel.update("s2", stage, "step");
            let percent = channel.read("s2").unwrap().percent;
            assert!(percent >= last);
            last = percent;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn sessions_are_independent() {
        let channel = ProgressChannel::new();
        channel.update("a", PipelineStage::Completed, "done");
        channel.update("b", PipelineStage::Initializing, "starting");
        assert_eq!(channel.read("a").unwrap().percent, 100);
        assert_eq!(channel.read("b").unwrap().percent, 0);
    }
}
