use crate::cli::ServeArgs;
use crate::infra::{load_dataset, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use emendas::config::AppConfig;
use emendas::error::AppError;
use emendas::telemetry;
use emendas::workflows::edital::{
    review_router, EditalParameters, EditalReviewService, InMemoryProjectStore,
};
use std::sync::atomic::{AtomicBool, Ordering};
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

    let projects = load_dataset(args.dataset.as_deref(), &config.edital.rules)?;
    let project_count = projects.len();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let rules = config.edital.rules.clone();
    let repository = Arc::new(InMemoryProjectStore::new(projects));
    let review_service = Arc::new(
        EditalReviewService::new(repository, rules.clone())
            .with_analysis_delay(config.edital.analysis_delay),
    );
    let parameters = Arc::new(EditalParameters::edital_2026(rules));

    let app = with_operational_routes(review_router(review_service, parameters))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        projects = project_count,
        threshold = config.edital.rules.approval_threshold,
        "emendas review service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
