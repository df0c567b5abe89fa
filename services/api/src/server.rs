use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talentscan::config::AppConfig;
use talentscan::error::AppError;
use talentscan::screening::candidates::{JsonFileStorage, ResultsStore, ScreeningService};
use talentscan::screening::classifier::RemoteClassifier;
use talentscan::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let classifier = Arc::new(
        RemoteClassifier::new()
            .with_url(config.classifier.base_url.clone())
            .with_timeout(config.classifier.timeout),
    );
    let store = Arc::new(ResultsStore::new(JsonFileStorage::new(
        &config.storage.results_path,
    )));
    let restored = store.initialize();
    info!(
        restored = restored.len(),
        path = %config.storage.results_path.display(),
        "screening history loaded"
    );

    let screening_service = Arc::new(ScreeningService::new(store, classifier));

    let app = with_screening_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "talentscan screening api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
