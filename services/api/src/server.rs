use crate::cli::ServeArgs;
use crate::infra::{build_engine, load_survey, AppState, InMemoryPredictionStore};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use radon_watch::assessment::AssessmentService;
use radon_watch::config::AppConfig;
use radon_watch::error::AppError;
use radon_watch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = build_engine(&config.scoring)?;
    let survey = load_survey(&config.scoring)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: engine.clone(),
        survey,
    };

    let store = Arc::new(InMemoryPredictionStore::default());
    let assessment_service =
        Arc::new(AssessmentService::new(engine, store).with_seed(config.scoring.seed));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        variance = config.scoring.variance_fraction,
        strict = config.scoring.strict_validation,
        "radon risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
