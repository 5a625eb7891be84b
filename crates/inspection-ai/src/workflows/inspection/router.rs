//! HTTP endpoints for driving a mock-inspection session. The engine is held
//! behind an async mutex: every turn is a sequence of awaited collaborator
//! calls, and the single-session ownership model has no concurrent writers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use super::client::ReasoningClient;
use super::repository::{ActionPublisher, AnalysisRepository};
use super::session::{SessionEngine, SessionError};

type SharedEngine<C, R, A> = Arc<Mutex<SessionEngine<C, R, A>>>;

/// Router builder exposing the session lifecycle and catalog lookups.
pub fn inspection_router<C, R, A>(engine: SharedEngine<C, R, A>) -> Router
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/inspection/scenarios",
            get(scenarios_handler::<C, R, A>),
        )
        .route(
            "/api/v1/inspection/session",
            post(start_handler::<C, R, A>)
                .get(view_handler::<C, R, A>)
                .delete(reset_handler::<C, R, A>),
        )
        .route(
            "/api/v1/inspection/session/answers",
            post(answer_handler::<C, R, A>),
        )
        .route(
            "/api/v1/inspection/session/actions",
            post(actions_handler::<C, R, A>),
        )
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartSessionRequest {
    scenario_id: String,
    /// Optional seed pinning the question draw; defaults to the clock.
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAnswerRequest {
    answer: String,
}

fn error_response(error: SessionError) -> Response {
    let status = match &error {
        SessionError::UnknownScenario(_) => StatusCode::NOT_FOUND,
        SessionError::NoMatchingQuestions(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::NoActiveSession
        | SessionError::NotAcceptingAnswers(_)
        | SessionError::NotComplete => StatusCode::CONFLICT,
        SessionError::Actions(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn scenarios_handler<C, R, A>(
    State(engine): State<SharedEngine<C, R, A>>,
) -> Response
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    let engine = engine.lock().await;
    let scenarios = engine.catalog().scenarios();
    (StatusCode::OK, axum::Json(json!({ "scenarios": scenarios }))).into_response()
}

pub(crate) async fn start_handler<C, R, A>(
    State(engine): State<SharedEngine<C, R, A>>,
    axum::Json(request): axum::Json<StartSessionRequest>,
) -> Response
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    let seed = request
        .seed
        .unwrap_or_else(|| Utc::now().timestamp_millis() as u64);

    let mut engine = engine.lock().await;
    match engine.start(&request.scenario_id, seed).await {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<C, R, A>(State(engine): State<SharedEngine<C, R, A>>) -> Response
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    let engine = engine.lock().await;
    (StatusCode::OK, axum::Json(engine.view())).into_response()
}

pub(crate) async fn reset_handler<C, R, A>(State(engine): State<SharedEngine<C, R, A>>) -> Response
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    let mut engine = engine.lock().await;
    engine.reset();
    (StatusCode::OK, axum::Json(engine.view())).into_response()
}

pub(crate) async fn answer_handler<C, R, A>(
    State(engine): State<SharedEngine<C, R, A>>,
    axum::Json(request): axum::Json<SubmitAnswerRequest>,
) -> Response
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    let mut engine = engine.lock().await;
    match engine.submit_answer(&request.answer).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn actions_handler<C, R, A>(
    State(engine): State<SharedEngine<C, R, A>>,
) -> Response
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    let engine = engine.lock().await;
    match engine.export_actions() {
        Ok(export) => (StatusCode::OK, axum::Json(export)).into_response(),
        Err(error) => error_response(error),
    }
}
