//! The mock-inspection state machine: setup -> in_progress -> evaluating ->
//! complete, with reset as the only way back. One engine owns at most one
//! session; there is no concurrent writer, and a reset simply discards the
//! in-memory session (late replies to a discarded session are dropped with
//! it).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::advance::{AdvancePredicate, PhraseAdvance};
use super::catalog::Catalog;
use super::client::ReasoningClient;
use super::domain::{
    EvaluatedResponse, InspectionQuestion, RatingBand, ScenarioDefinition, SessionStatus, Speaker,
    TranscriptEntry,
};
use super::evaluator::{default_response, Evaluator};
use super::report::{build_report, findings_to_actions, InspectionReport};
use super::repository::{ActionError, ActionPublisher, AnalysisRepository, ComplianceAnalysisRecord};
use super::selection::select_questions;

const INTERVIEWER_SYSTEM: &str = "You are a CQC inspector conducting a mock inspection interview \
at a UK care home. Ask one thing at a time, probe vague answers with short follow-ups, and when \
an area is covered say so explicitly (for example \"Thank you, let's move on.\"). Stay in \
character and keep replies to a few sentences.";

/// Neutral probe used when the reasoning service cannot produce an
/// interviewer reply; the candidate is never left without a prompt.
const FALLBACK_PROBE: &str = "Thank you. Is there anything you would add to that?";

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> String {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("insp-{id:06}")
}

/// Errors surfaced to callers of the engine. Collaborator failures inside a
/// turn are absorbed by fallbacks and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no scenario with id {0}")]
    UnknownScenario(String),
    #[error("no questions in the bank match scenario {0}")]
    NoMatchingQuestions(String),
    #[error("no active inspection session")]
    NoActiveSession,
    #[error("session is not accepting answers (status {0})")]
    NotAcceptingAnswers(&'static str),
    #[error("session is not complete; nothing to export")]
    NotComplete,
    #[error(transparent)]
    Actions(#[from] ActionError),
}

/// The one mutable entity: state of a single interview run.
#[derive(Debug)]
pub struct InspectionSession {
    pub id: String,
    pub scenario: &'static ScenarioDefinition,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    questions: Vec<&'static InspectionQuestion>,
    current: usize,
    /// Transcript for the current question only; cleared on advance.
    transcript: Vec<TranscriptEntry>,
    pub responses: Vec<EvaluatedResponse>,
    pub overall_score: Option<f32>,
    pub feedback: Option<String>,
    report: Option<InspectionReport>,
}

impl InspectionSession {
    fn current_question(&self) -> Option<&'static InspectionQuestion> {
        self.questions.get(self.current).copied()
    }

    fn candidate_turns(&self) -> usize {
        self.transcript
            .iter()
            .filter(|entry| entry.speaker == Speaker::Candidate)
            .count()
    }

    fn latest_prompt(&self) -> Option<String> {
        self.transcript
            .iter()
            .rev()
            .find(|entry| entry.speaker == Speaker::Inspector)
            .map(|entry| entry.text.clone())
    }
}

/// Progress snapshot exposed to the HTTP surface and CLI.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub scenario_id: String,
    pub scenario_title: String,
    pub status: SessionStatus,
    pub question_number: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_prompt: Option<String>,
    pub responses: Vec<EvaluatedResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<RatingBand>,
}

/// What happened as a result of one submitted answer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The interviewer probed further on the same question.
    InspectorReply { text: String },
    /// The current question was evaluated and the next one issued.
    QuestionEvaluated {
        evaluation: EvaluatedResponse,
        next_question: String,
    },
    /// The final question was evaluated and the report built.
    SessionComplete {
        evaluation: EvaluatedResponse,
        report: InspectionReport,
    },
}

/// Outcome of a findings-to-actions export.
#[derive(Debug, Clone, Serialize)]
pub struct ActionExport {
    pub findings: usize,
    pub created: usize,
}

/// Drives a single interview session against the catalog, the reasoning
/// service, and the persistence collaborators.
pub struct SessionEngine<C, R, A> {
    catalog: Catalog,
    evaluator: Evaluator<C>,
    analyses: Arc<R>,
    actions: Arc<A>,
    advance: Box<dyn AdvancePredicate>,
    organization: String,
    session: Option<InspectionSession>,
}

impl<C, R, A> SessionEngine<C, R, A>
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    pub fn new(
        catalog: Catalog,
        evaluator: Evaluator<C>,
        analyses: Arc<R>,
        actions: Arc<A>,
        organization: impl Into<String>,
    ) -> Self {
        Self::with_advance(
            catalog,
            evaluator,
            analyses,
            actions,
            organization,
            Box::new(PhraseAdvance::default()),
        )
    }

    pub fn with_advance(
        catalog: Catalog,
        evaluator: Evaluator<C>,
        analyses: Arc<R>,
        actions: Arc<A>,
        organization: impl Into<String>,
        advance: Box<dyn AdvancePredicate>,
    ) -> Self {
        Self {
            catalog,
            evaluator,
            analyses,
            actions,
            advance,
            organization: organization.into(),
            session: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start a fresh session for the given scenario. Any previous session is
    /// discarded. `seed` pins the question draw.
    pub async fn start(&mut self, scenario_id: &str, seed: u64) -> Result<SessionView, SessionError> {
        let scenario = self
            .catalog
            .scenario(scenario_id)
            .ok_or_else(|| SessionError::UnknownScenario(scenario_id.to_string()))?;

        let questions = select_questions(&self.catalog, scenario, seed);
        if questions.is_empty() {
            return Err(SessionError::NoMatchingQuestions(scenario_id.to_string()));
        }

        let mut session = InspectionSession {
            id: next_session_id(),
            scenario,
            started_at: Utc::now(),
            ended_at: None,
            status: SessionStatus::Setup,
            questions,
            current: 0,
            transcript: Vec::new(),
            responses: Vec::new(),
            overall_score: None,
            feedback: None,
            report: None,
        };

        session.status = SessionStatus::InProgress;
        let first = session.current_question().expect("selection is non-empty");
        let opening = question_wording(&self.evaluator, scenario, first, true).await;
        session.transcript.push(TranscriptEntry::inspector(opening));

        self.session = Some(session);
        Ok(self.view())
    }

    /// Feed one candidate answer through the state machine.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<TurnOutcome, SessionError> {
        let Some(session) = self.session.as_mut() else {
            return Err(SessionError::NoActiveSession);
        };
        if session.status != SessionStatus::InProgress {
            return Err(SessionError::NotAcceptingAnswers(session.status.label()));
        }

        let scenario = session.scenario;
        let question = session
            .current_question()
            .expect("in_progress session always has a current question");

        session
            .transcript
            .push(TranscriptEntry::candidate(answer.to_string()));
        let turns = session.candidate_turns();

        let history_end = session.transcript.len() - 1;
        let reply = match self
            .evaluator
            .generate(
                &interviewer_context(scenario, question),
                &session.transcript[..history_end],
                answer,
            )
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(question = question.id, error = %err, "interviewer reply unavailable, using canned probe");
                question
                    .follow_ups
                    .get(turns.saturating_sub(1))
                    .map(|prompt| prompt.to_string())
                    .unwrap_or_else(|| FALLBACK_PROBE.to_string())
            }
        };
        session
            .transcript
            .push(TranscriptEntry::inspector(reply.clone()));

        if !self.advance.should_advance(&reply, turns) {
            return Ok(TurnOutcome::InspectorReply { text: reply });
        }

        // Question finished: evaluate its transcript, degrading to a default
        // result if the evaluator chain is exhausted.
        let evaluation = match self.evaluator.evaluate(question, &session.transcript).await {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(question = question.id, error = %err, "evaluation unavailable, recording default");
                default_response(question, &session.transcript)
            }
        };
        session.responses.push(evaluation.clone());
        session.transcript.clear();
        session.current += 1;

        if let Some(next) = session.current_question() {
            let wording = question_wording(&self.evaluator, scenario, next, false).await;
            session
                .transcript
                .push(TranscriptEntry::inspector(wording.clone()));
            return Ok(TurnOutcome::QuestionEvaluated {
                evaluation,
                next_question: wording,
            });
        }

        session.status = SessionStatus::Evaluating;
        let report = build_report(scenario, &session.responses);
        session.overall_score = Some(report.overall_score);
        session.feedback = Some(report.feedback.clone());

        // Persistence is fail-open: the user still gets their report even if
        // the summary row cannot be written.
        let record = ComplianceAnalysisRecord {
            organization_id: self.organization.clone(),
            analysis_type: "mock_inspection".to_string(),
            overall_score: (report.overall_score * 25.0).round() as u8,
            summary: format!(
                "{} — overall {:.1}/4.0 ({})",
                scenario.title,
                report.overall_score,
                report.band.label()
            ),
            detail: json!({
                "scenario": scenario.id,
                "responses": session.responses,
                "feedback": report.feedback,
            }),
        };
        if let Err(err) = self.analyses.save(record) {
            warn!(session = session.id, error = %err, "failed to persist inspection summary");
        }

        session.status = SessionStatus::Complete;
        session.ended_at = Some(Utc::now());
        session.report = Some(report.clone());

        Ok(TurnOutcome::SessionComplete { evaluation, report })
    }

    /// Discard the session and return to setup. Valid from any state.
    pub fn reset(&mut self) {
        self.session = None;
    }

    pub fn report(&self) -> Option<&InspectionReport> {
        self.session
            .as_ref()
            .and_then(|session| session.report.as_ref())
    }

    /// Convert sub-Good findings into remediation actions via one bulk call.
    /// Zero findings is a success, not an error, and skips the collaborator
    /// entirely.
    pub fn export_actions(&self) -> Result<ActionExport, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        if session.status != SessionStatus::Complete {
            return Err(SessionError::NotComplete);
        }

        let actions = findings_to_actions(&session.responses);
        if actions.is_empty() {
            return Ok(ActionExport {
                findings: 0,
                created: 0,
            });
        }

        let created = self.actions.create_actions(&actions)?;
        Ok(ActionExport {
            findings: actions.len(),
            created,
        })
    }

    /// Snapshot of the current session, or an empty setup view when none.
    pub fn view(&self) -> SessionView {
        match &self.session {
            Some(session) => SessionView {
                session_id: session.id.clone(),
                scenario_id: session.scenario.id.to_string(),
                scenario_title: session.scenario.title.to_string(),
                status: session.status,
                question_number: (session.current + 1).min(session.questions.len()),
                total_questions: session.questions.len(),
                current_prompt: session.latest_prompt(),
                responses: session.responses.clone(),
                overall_score: session.overall_score,
                band: session.overall_score.map(RatingBand::from_score),
            },
            None => SessionView {
                session_id: String::new(),
                scenario_id: String::new(),
                scenario_title: String::new(),
                status: SessionStatus::Setup,
                question_number: 0,
                total_questions: 0,
                current_prompt: None,
                responses: Vec::new(),
                overall_score: None,
                band: None,
            },
        }
    }

}

/// Ask the reasoning service to pose the question in the inspector's own
/// words; fall back to the canonical stored text so the candidate is never
/// left without a question.
async fn question_wording<C: ReasoningClient>(
    evaluator: &Evaluator<C>,
    scenario: &ScenarioDefinition,
    question: &InspectionQuestion,
    opening: bool,
) -> String {
    let instruction = if opening {
        format!(
            "Open the interview with a one-sentence greeting, then ask this question in your own \
             words without changing its substance: {}",
            question.text
        )
    } else {
        format!(
            "Briefly acknowledge the previous answer, then ask this question in your own words \
             without changing its substance: {}",
            question.text
        )
    };

    match evaluator
        .generate(&interviewer_context(scenario, question), &[], &instruction)
        .await
    {
        Ok(text) => text,
        Err(err) => {
            warn!(question = question.id, error = %err, "question wording unavailable, using canonical text");
            question.text.to_string()
        }
    }
}

fn interviewer_context(scenario: &ScenarioDefinition, question: &InspectionQuestion) -> String {
    format!(
        "{INTERVIEWER_SYSTEM}\n\nScenario: {} ({}, interviewing a {}).\nCurrent question: {}\nKey \
         question area: {}",
        scenario.title,
        scenario.difficulty.label(),
        scenario.target_role.label(),
        question.text,
        question.key_question.label()
    )
}
