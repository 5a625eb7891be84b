use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use inspection_ai::workflows::inspection::{
    inspection_router, ActionError, ActionPublisher, AnalysisRepository, Catalog,
    ComplianceAnalysisRecord, CreateActionInput, Evaluator, EvaluatorConfig, ReasoningClient,
    ReasoningError, ReasoningRequest, RepositoryError, SessionEngine,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tower::ServiceExt;

struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedClient {
    fn new(replies: Vec<String>) -> Self {
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
            .ok_or(ReasoningError::EmptyResponse)
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

fn test_router(replies: Vec<String>) -> Router {
    let catalog = Catalog::load().expect("catalog is internally consistent");
    let evaluator = Evaluator::new(
        Arc::new(ScriptedClient::new(replies)),
        EvaluatorConfig {
            model_chain: vec!["primary".to_string()],
            attempts_per_model: 1,
            backoff: Duration::ZERO,
        },
    );
    let engine = SessionEngine::new(
        catalog,
        evaluator,
        Arc::new(MemoryAnalyses::default()),
        Arc::new(MemoryActions::default()),
        "org-willow-lodge",
    );
    inspection_router(Arc::new(AsyncMutex::new(engine)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[tokio::test]
async fn scenario_listing_returns_the_catalog() {
    let app = test_router(Vec::new());

    let response = app
        .oneshot(empty_request("GET", "/api/v1/inspection/scenarios"))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let scenarios = body["scenarios"].as_array().expect("scenario array");
    assert_eq!(scenarios.len(), 5);
    assert!(scenarios
        .iter()
        .any(|scenario| scenario["id"] == "full-mock-inspection"));
}

#[tokio::test]
async fn starting_a_session_returns_the_opening_prompt() {
    let app = test_router(vec!["Welcome. Tell me about safeguarding.".to_string()]);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session",
            json!({ "scenario_id": "care-worker-quick-check", "seed": 7 }),
        ))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["question_number"], 1);
    assert_eq!(body["total_questions"], 4);
    assert_eq!(body["current_prompt"], "Welcome. Tell me about safeguarding.");
}

#[tokio::test]
async fn starting_an_unknown_scenario_is_not_found() {
    let app = test_router(Vec::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session",
            json!({ "scenario_id": "night-shift-audit" }),
        ))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn answers_without_a_session_conflict() {
    let app = test_router(Vec::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session/answers",
            json!({ "answer": "We follow the policy." }),
        ))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submitting_an_answer_reports_the_turn_outcome() {
    let app = test_router(vec![
        "Q1?".to_string(),
        "Could you expand on that?".to_string(),
    ]);

    let start = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session",
            json!({ "scenario_id": "care-worker-quick-check", "seed": 7 }),
        ))
        .await
        .expect("request handled");
    assert_eq!(start.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session/answers",
            json!({ "answer": "We log every incident." }),
        ))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["kind"], "inspector_reply");
    assert_eq!(body["text"], "Could you expand on that?");
}

#[tokio::test]
async fn deleting_the_session_resets_to_setup() {
    let app = test_router(vec!["Q1?".to_string()]);

    let start = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session",
            json!({ "scenario_id": "care-worker-quick-check", "seed": 7 }),
        ))
        .await
        .expect("request handled");
    assert_eq!(start.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/v1/inspection/session"))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "setup");
    assert_eq!(body["total_questions"], 0);
}

#[tokio::test]
async fn exporting_actions_before_completion_conflicts() {
    let app = test_router(vec!["Q1?".to_string()]);

    let start = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/inspection/session",
            json!({ "scenario_id": "care-worker-quick-check", "seed": 7 }),
        ))
        .await
        .expect("request handled");
    assert_eq!(start.status(), StatusCode::CREATED);

    let response = app
        .oneshot(empty_request("POST", "/api/v1/inspection/session/actions"))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
