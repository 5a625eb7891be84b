use async_trait::async_trait;
use inspection_ai::workflows::inspection::{
    ActionError, ActionPriority, ActionPublisher, AnalysisRepository, Catalog,
    ComplianceAnalysisRecord, CreateActionInput, Evaluator, EvaluatorConfig, ReasoningClient,
    ReasoningError, ReasoningRequest, RepositoryError, SessionEngine, SessionError, SessionStatus,
    TurnOutcome, DEFAULT_SCORE,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SCENARIO: &str = "care-worker-quick-check";

struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, ReasoningError>>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<String, ReasoningError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl ReasoningClient for ScriptedClient {
    async fn generate(&self, _request: ReasoningRequest<'_>) -> Result<String, ReasoningError> {
        self.replies
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .unwrap_or(Err(ReasoningError::EmptyResponse))
    }
}

#[derive(Default)]
struct MemoryAnalyses {
    records: Mutex<Vec<ComplianceAnalysisRecord>>,
}

impl AnalysisRepository for MemoryAnalyses {
    fn save(&self, record: ComplianceAnalysisRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("analysis mutex poisoned")
            .push(record);
        Ok(())
    }
}

struct FailingAnalyses;

impl AnalysisRepository for FailingAnalyses {
    fn save(&self, _record: ComplianceAnalysisRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("datastore offline".to_string()))
    }
}

#[derive(Default)]
struct MemoryActions {
    actions: Mutex<Vec<CreateActionInput>>,
}

impl ActionPublisher for MemoryActions {
    fn create_actions(&self, actions: &[CreateActionInput]) -> Result<usize, ActionError> {
        self.actions
            .lock()
            .expect("action mutex poisoned")
            .extend_from_slice(actions);
        Ok(actions.len())
    }
}

struct FailingActions;

impl ActionPublisher for FailingActions {
    fn create_actions(&self, _actions: &[CreateActionInput]) -> Result<usize, ActionError> {
        Err(ActionError::Transport("action tracker offline".to_string()))
    }
}

fn test_config() -> EvaluatorConfig {
    EvaluatorConfig {
        model_chain: vec!["primary".to_string()],
        attempts_per_model: 1,
        backoff: Duration::ZERO,
    }
}

fn engine_with(
    replies: Vec<Result<String, ReasoningError>>,
) -> SessionEngine<ScriptedClient, MemoryAnalyses, MemoryActions> {
    engine_with_config(replies, test_config())
}

fn engine_with_config(
    replies: Vec<Result<String, ReasoningError>>,
    config: EvaluatorConfig,
) -> SessionEngine<ScriptedClient, MemoryAnalyses, MemoryActions> {
    let catalog = Catalog::load().expect("catalog is internally consistent");
    let evaluator = Evaluator::new(Arc::new(ScriptedClient::new(replies)), config);
    SessionEngine::new(
        catalog,
        evaluator,
        Arc::new(MemoryAnalyses::default()),
        Arc::new(MemoryActions::default()),
        "org-willow-lodge",
    )
}

fn verdict(score: u8) -> Result<String, ReasoningError> {
    Ok(serde_json::json!({
        "score": score,
        "evaluation": format!("Scored {score} against the rubric."),
        "strengths": ["clear escalation"],
        "improvements": ["cite the written policy"],
    })
    .to_string())
}

fn advance_reply() -> Result<String, ReasoningError> {
    Ok("Thank you, that's helpful. Let's move on.".to_string())
}

fn wording(text: &str) -> Result<String, ReasoningError> {
    Ok(text.to_string())
}

/// Script for a full quick-check session (four questions, one answer each)
/// with the given per-question scores.
fn full_session_script(scores: [u8; 4]) -> Vec<Result<String, ReasoningError>> {
    let mut script = vec![wording("Q1: tell me about safeguarding.")];
    for (index, score) in scores.into_iter().enumerate() {
        script.push(advance_reply());
        script.push(verdict(score));
        if index < 3 {
            script.push(wording("Next question, please."));
        }
    }
    script
}

async fn drive_to_completion<A: ActionPublisher + 'static>(
    engine: &mut SessionEngine<ScriptedClient, MemoryAnalyses, A>,
) -> TurnOutcome {
    loop {
        let outcome = engine
            .submit_answer("We report concerns to the nurse in charge straight away.")
            .await
            .expect("answer accepted");
        if matches!(outcome, TurnOutcome::SessionComplete { .. }) {
            return outcome;
        }
    }
}

#[tokio::test]
async fn full_session_flow_completes_with_report_and_summary() {
    let mut engine = engine_with(full_session_script([4, 3, 2, 1]));

    let view = engine.start(SCENARIO, 7).await.expect("session starts");
    assert_eq!(view.status, SessionStatus::InProgress);
    assert_eq!(view.total_questions, 4);
    assert_eq!(view.question_number, 1);
    assert_eq!(
        view.current_prompt.as_deref(),
        Some("Q1: tell me about safeguarding.")
    );

    let outcome = drive_to_completion(&mut engine).await;
    let TurnOutcome::SessionComplete { report, .. } = outcome else {
        panic!("expected completion outcome");
    };

    assert!((report.overall_score - 2.5).abs() < f32::EPSILON);
    assert_eq!(report.band.label(), "Good");
    assert_eq!(report.findings.len(), 2, "scores 2 and 1 are findings");

    let view = engine.view();
    assert_eq!(view.status, SessionStatus::Complete);
    assert_eq!(view.responses.len(), 4);
    assert_eq!(view.overall_score, Some(2.5));
}

#[tokio::test]
async fn completed_session_persists_scaled_summary_row() {
    let catalog = Catalog::load().expect("catalog is internally consistent");
    let analyses = Arc::new(MemoryAnalyses::default());
    let evaluator = Evaluator::new(
        Arc::new(ScriptedClient::new(full_session_script([4, 3, 2, 1]))),
        test_config(),
    );
    let mut engine = SessionEngine::new(
        catalog,
        evaluator,
        analyses.clone(),
        Arc::new(MemoryActions::default()),
        "org-willow-lodge",
    );

    engine.start(SCENARIO, 7).await.expect("session starts");
    drive_to_completion(&mut engine).await;

    let records = analyses.records.lock().expect("analysis mutex poisoned");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.organization_id, "org-willow-lodge");
    assert_eq!(record.analysis_type, "mock_inspection");
    assert_eq!(record.overall_score, 63, "2.5 on the 1-4 scale times 25");
    assert!(record.summary.contains("2.5/4.0"));
    assert_eq!(record.detail["scenario"], SCENARIO);
}

#[tokio::test]
async fn malformed_evaluator_reply_degrades_to_default_score() {
    let mut engine = engine_with(vec![
        wording("Q1?"),
        advance_reply(),
        Ok("Sorry, I cannot comply with that request.".to_string()),
        wording("Q2?"),
    ]);

    engine.start(SCENARIO, 7).await.expect("session starts");
    let outcome = engine
        .submit_answer("We follow the safeguarding policy.")
        .await
        .expect("answer accepted");

    let TurnOutcome::QuestionEvaluated { evaluation, .. } = outcome else {
        panic!("expected the question to be evaluated");
    };
    assert_eq!(evaluation.score, DEFAULT_SCORE);
    assert!(evaluation.evaluation.contains("Sorry, I cannot comply"));
    assert!(evaluation.strengths.is_empty());
    assert!(evaluation.improvements.is_empty());
}

#[tokio::test]
async fn fenced_evaluator_reply_still_parses() {
    let fenced = format!(
        "```json\n{}\n```",
        serde_json::json!({
            "score": 2,
            "evaluation": "Thin on detail.",
            "strengths": [],
            "improvements": ["name the escalation route"],
        })
    );
    let mut engine = engine_with(vec![wording("Q1?"), advance_reply(), Ok(fenced), wording("Q2?")]);

    engine.start(SCENARIO, 7).await.expect("session starts");
    let outcome = engine
        .submit_answer("We do our best.")
        .await
        .expect("answer accepted");

    let TurnOutcome::QuestionEvaluated { evaluation, .. } = outcome else {
        panic!("expected the question to be evaluated");
    };
    assert_eq!(evaluation.score, 2);
    assert_eq!(evaluation.evaluation, "Thin on detail.");
}

#[tokio::test]
async fn interviewer_probes_until_the_turn_cap_forces_advance() {
    let mut script = vec![wording("Q1?")];
    for _ in 0..5 {
        script.push(Ok("Could you tell me more about that?".to_string()));
    }
    // Sixth candidate turn: still no advance phrase, but the cap fires.
    script.push(Ok("Interesting, go on.".to_string()));
    script.push(verdict(3));
    script.push(wording("Q2?"));

    let mut engine = engine_with(script);
    engine.start(SCENARIO, 7).await.expect("session starts");

    for turn in 1..=5 {
        let outcome = engine
            .submit_answer("A short answer.")
            .await
            .expect("answer accepted");
        assert!(
            matches!(outcome, TurnOutcome::InspectorReply { .. }),
            "turn {turn} should stay on the same question"
        );
    }

    let outcome = engine
        .submit_answer("A sixth short answer.")
        .await
        .expect("answer accepted");
    let TurnOutcome::QuestionEvaluated { evaluation, next_question } = outcome else {
        panic!("the turn cap should force evaluation");
    };
    assert_eq!(evaluation.score, 3);
    assert_eq!(next_question, "Q2?");
}

#[tokio::test]
async fn evaluator_falls_back_to_the_next_model_on_retryable_errors() {
    let config = EvaluatorConfig {
        model_chain: vec!["primary".to_string(), "fallback".to_string()],
        attempts_per_model: 1,
        backoff: Duration::ZERO,
    };
    let script = vec![
        wording("Q1?"),
        advance_reply(),
        Err(ReasoningError::Transport("connection reset".to_string())),
        verdict(4),
        wording("Q2?"),
    ];

    let mut engine = engine_with_config(script, config);
    engine.start(SCENARIO, 7).await.expect("session starts");
    let outcome = engine
        .submit_answer("We audit incidents monthly.")
        .await
        .expect("answer accepted");

    let TurnOutcome::QuestionEvaluated { evaluation, .. } = outcome else {
        panic!("expected the question to be evaluated");
    };
    assert_eq!(evaluation.score, 4, "fallback model's verdict should win");
}

#[tokio::test]
async fn exhausted_model_chain_records_the_default_response() {
    let config = EvaluatorConfig {
        model_chain: vec!["primary".to_string(), "fallback".to_string()],
        attempts_per_model: 1,
        backoff: Duration::ZERO,
    };
    let script = vec![
        wording("Q1?"),
        advance_reply(),
        Err(ReasoningError::Transport("connection reset".to_string())),
        Err(ReasoningError::Api {
            status: 503,
            body: "overloaded".to_string(),
        }),
        wording("Q2?"),
    ];

    let mut engine = engine_with_config(script, config);
    engine.start(SCENARIO, 7).await.expect("session starts");
    let outcome = engine
        .submit_answer("We audit incidents monthly.")
        .await
        .expect("answer accepted");

    let TurnOutcome::QuestionEvaluated { evaluation, .. } = outcome else {
        panic!("expected the question to be evaluated");
    };
    assert_eq!(evaluation.score, DEFAULT_SCORE);
    assert!(evaluation.evaluation.contains("provisional"));
}

#[tokio::test]
async fn exhausted_chain_returns_without_a_trailing_backoff() {
    // One model, one attempt: the first retryable failure is also the last,
    // so the error must come back without serving the 60s backoff.
    let evaluator = Evaluator::new(
        Arc::new(ScriptedClient::new(vec![Err(ReasoningError::Transport(
            "connection reset".to_string(),
        ))])),
        EvaluatorConfig {
            model_chain: vec!["primary".to_string()],
            attempts_per_model: 1,
            backoff: Duration::from_secs(60),
        },
    );

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        evaluator.generate("You are an interviewer.", &[], "hello"),
    )
    .await
    .expect("exhausted chain should fail fast, not sleep");
    assert!(matches!(result, Err(ReasoningError::Transport(_))));
}

#[tokio::test]
async fn interviewer_outage_falls_back_to_canned_probes() {
    // The interviewer generate call fails outright; the engine should serve
    // the question's scripted follow-up instead of erroring the turn.
    let script = vec![
        wording("Q1?"),
        Err(ReasoningError::Api {
            status: 401,
            body: "bad key".to_string(),
        }),
    ];

    let mut engine = engine_with(script);
    engine.start(SCENARIO, 7).await.expect("session starts");
    let outcome = engine
        .submit_answer("We keep records.")
        .await
        .expect("answer accepted");

    let TurnOutcome::InspectorReply { text } = outcome else {
        panic!("a failed interviewer call should still probe");
    };
    assert!(!text.is_empty());
}

#[tokio::test]
async fn persistence_failure_still_completes_the_session() {
    let catalog = Catalog::load().expect("catalog is internally consistent");
    let evaluator = Evaluator::new(
        Arc::new(ScriptedClient::new(full_session_script([3, 3, 3, 3]))),
        test_config(),
    );
    let mut engine = SessionEngine::new(
        catalog,
        evaluator,
        Arc::new(FailingAnalyses),
        Arc::new(MemoryActions::default()),
        "org-willow-lodge",
    );

    engine.start(SCENARIO, 7).await.expect("session starts");
    let outcome = loop {
        let outcome = engine
            .submit_answer("We follow the policy.")
            .await
            .expect("answer accepted");
        if matches!(outcome, TurnOutcome::SessionComplete { .. }) {
            break outcome;
        }
    };

    assert!(matches!(outcome, TurnOutcome::SessionComplete { .. }));
    assert_eq!(engine.view().status, SessionStatus::Complete);
}

#[tokio::test]
async fn export_turns_sub_good_findings_into_actions() {
    let catalog = Catalog::load().expect("catalog is internally consistent");
    let actions = Arc::new(MemoryActions::default());
    let evaluator = Evaluator::new(
        Arc::new(ScriptedClient::new(full_session_script([4, 3, 2, 1]))),
        test_config(),
    );
    let mut engine = SessionEngine::new(
        catalog,
        evaluator,
        Arc::new(MemoryAnalyses::default()),
        actions.clone(),
        "org-willow-lodge",
    );

    engine.start(SCENARIO, 7).await.expect("session starts");
    drive_to_completion(&mut engine).await;

    let export = engine.export_actions().expect("export succeeds");
    assert_eq!(export.findings, 2);
    assert_eq!(export.created, 2);

    let created = actions.actions.lock().expect("action mutex poisoned");
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|action| action.title.starts_with("Address gap:")));
    assert_eq!(
        created
            .iter()
            .filter(|action| action.priority == ActionPriority::High)
            .count(),
        1,
        "only the score-1 finding is high priority"
    );
}

#[tokio::test]
async fn export_with_no_findings_skips_the_action_tracker() {
    // FailingActions would error if called, so a clean pass proves the
    // zero-findings path never touches the collaborator.
    let catalog = Catalog::load().expect("catalog is internally consistent");
    let evaluator = Evaluator::new(
        Arc::new(ScriptedClient::new(full_session_script([4, 4, 3, 4]))),
        test_config(),
    );
    let mut engine = SessionEngine::new(
        catalog,
        evaluator,
        Arc::new(MemoryAnalyses::default()),
        Arc::new(FailingActions),
        "org-willow-lodge",
    );

    engine.start(SCENARIO, 7).await.expect("session starts");
    drive_to_completion(&mut engine).await;

    let export = engine.export_actions().expect("zero findings is a success");
    assert_eq!(export.findings, 0);
    assert_eq!(export.created, 0);
}

#[tokio::test]
async fn export_requires_a_completed_session() {
    let mut engine = engine_with(vec![wording("Q1?")]);

    assert!(matches!(
        engine.export_actions(),
        Err(SessionError::NoActiveSession)
    ));

    engine.start(SCENARIO, 7).await.expect("session starts");
    assert!(matches!(
        engine.export_actions(),
        Err(SessionError::NotComplete)
    ));
}

#[tokio::test]
async fn reset_discards_the_session_from_any_state() {
    let mut engine = engine_with(vec![wording("Q1?")]);
    engine.start(SCENARIO, 7).await.expect("session starts");

    engine.reset();
    assert_eq!(engine.view().status, SessionStatus::Setup);
    assert!(matches!(
        engine.submit_answer("hello").await,
        Err(SessionError::NoActiveSession)
    ));
}

#[tokio::test]
async fn start_rejects_unknown_scenarios() {
    let mut engine = engine_with(Vec::new());
    let result = engine.start("night-shift-audit", 7).await;
    assert!(matches!(result, Err(SessionError::UnknownScenario(id)) if id == "night-shift-audit"));
}

#[tokio::test]
async fn same_seed_draws_the_same_questions() {
    let mut first = engine_with(vec![wording("Q1?")]);
    let mut second = engine_with(vec![wording("Q1?")]);

    let view_a = first.start(SCENARIO, 42).await.expect("session starts");
    let view_b = second.start(SCENARIO, 42).await.expect("session starts");

    assert_eq!(view_a.total_questions, view_b.total_questions);
    // Both engines received the same scripted opening, so equality of the
    // prompt only proves plumbing; the draw itself is covered by the
    // selection unit tests. Here we pin the session shape.
    assert_eq!(view_a.question_number, 1);
    assert_eq!(view_b.question_number, 1);
}
