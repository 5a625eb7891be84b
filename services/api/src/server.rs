use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryActionPublisher, InMemoryAnalysisRepository};
use crate::routes::with_inspection_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use inspection_ai::config::AppConfig;
use inspection_ai::error::AppError;
use inspection_ai::telemetry;
use inspection_ai::workflows::inspection::{
    Catalog, Evaluator, EvaluatorConfig, GeminiClient, SessionEngine,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.ai.api_key.is_none() {
        warn!("AI_API_KEY is not set; answer evaluation will fall back to default scores");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Catalog::load()?;
    let client = Arc::new(GeminiClient::new(&config.ai));
    let evaluator = Evaluator::new(client, EvaluatorConfig::from_ai(&config.ai));
    let analyses = Arc::new(InMemoryAnalysisRepository::default());
    let actions = Arc::new(InMemoryActionPublisher::default());
    let engine = SessionEngine::new(
        catalog,
        evaluator,
        analyses,
        actions,
        config.organization.clone(),
    );

    let app = with_inspection_routes(Arc::new(tokio::sync::Mutex::new(engine)))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mock inspection engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
