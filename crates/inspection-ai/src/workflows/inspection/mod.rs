//! Mock Inspection Session Engine.
//!
//! Static CQC reference data feeds a seeded question selection; a session
//! controller drives the chat-style interview through the reasoning client,
//! scores answers via the evaluator, and hands the results to the report
//! builder and persistence collaborators.

pub mod advance;
pub mod catalog;
pub mod client;
pub mod domain;
pub mod evaluator;
pub mod report;
pub mod repository;
pub mod router;
pub mod selection;
pub mod session;

pub use advance::{AdvancePredicate, PhraseAdvance};
pub use catalog::{Catalog, CatalogError};
pub use client::{GeminiClient, ReasoningClient, ReasoningError, ReasoningRequest};
pub use domain::{
    ActionPriority, Difficulty, EvaluatedResponse, InspectionQuestion, KeyQuestion, QualityStatement,
    RatingBand, ScenarioDefinition, SessionStatus, Speaker, TargetRole, TranscriptEntry,
};
pub use evaluator::{Evaluator, EvaluatorConfig, DEFAULT_SCORE};
pub use report::{aggregate_score, build_report, findings_to_actions, InspectionReport};
pub use repository::{
    ActionError, ActionPublisher, AnalysisRepository, ComplianceAnalysisRecord, CreateActionInput,
    RepositoryError,
};
pub use router::inspection_router;
pub use session::{
    ActionExport, InspectionSession, SessionEngine, SessionError, SessionView, TurnOutcome,
};
