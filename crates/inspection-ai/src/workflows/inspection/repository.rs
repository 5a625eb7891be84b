//! Persistence collaborators. The engine writes one summary row per completed
//! session and, on demand, a bulk batch of remediation actions. Both sit
//! behind traits so the engine can be exercised in isolation.

use serde::{Deserialize, Serialize};

use super::domain::ActionPriority;

/// Summary row persisted when a session completes. `overall_score` is the
/// continuous 1.0-4.0 aggregate scaled by 25 onto a 25-100 integer range
/// (the zero end of the percentage scale is intentionally unused).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAnalysisRecord {
    pub organization_id: String,
    pub analysis_type: String,
    pub overall_score: u8,
    pub summary: String,
    pub detail: serde_json::Value,
}

/// Storage abstraction for completed-session summaries.
pub trait AnalysisRepository: Send + Sync {
    fn save(&self, record: ComplianceAnalysisRecord) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("analysis store unavailable: {0}")]
    Unavailable(String),
}

/// Remediation action derived from a low-scoring finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateActionInput {
    pub title: String,
    pub description: String,
    pub priority: ActionPriority,
    pub source_question_id: String,
}

/// Outbound hook to the action-tracking collaborator. One bulk call per
/// export; the engine does not track downstream resolution.
pub trait ActionPublisher: Send + Sync {
    fn create_actions(&self, actions: &[CreateActionInput]) -> Result<usize, ActionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("action tracker unavailable: {0}")]
    Transport(String),
}
