use crate::cli::ServeArgs;
use crate::infra::{load_classifier, AppState};
use crate::routes::with_credit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_scoring::config::{AppConfig, ModelConfig};
use credit_scoring::error::AppError;
use credit_scoring::telemetry;
use credit_scoring::workflows::creditworthiness::CreditScoringService;
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
    if let Some(model) = args.model.take() {
        config.model = ModelConfig::new(model.to_string_lossy())?;
    }

    telemetry::init(&config.telemetry)?;

    let classifier = load_classifier(&config.model.artifact_path)?;
    let scoring_service = Arc::new(CreditScoringService::new(classifier));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_credit_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.model.artifact_path.display(),
        "creditworthiness scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
