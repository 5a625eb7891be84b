use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use inspection_ai::workflows::inspection::{
    inspection_router, ActionPublisher, AnalysisRepository, ReasoningClient, SessionEngine,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

pub(crate) fn with_inspection_routes<C, R, A>(
    engine: Arc<Mutex<SessionEngine<C, R, A>>>,
) -> axum::Router
where
    C: ReasoningClient + 'static,
    R: AnalysisRepository + 'static,
    A: ActionPublisher + 'static,
{
    inspection_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
