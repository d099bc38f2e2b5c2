use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCatalogRepository};
use crate::routes::with_optimizer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use profit_mix::catalog::CatalogImporter;
use profit_mix::config::AppConfig;
use profit_mix::error::AppError;
use profit_mix::optimizer::BlendService;
use profit_mix::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog) = args.catalog.take() {
        config.catalog.path = Some(catalog);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCatalogRepository::default());
    if let Some(path) = &config.catalog.path {
        let load = CatalogImporter::from_path(path)?;
        for line in &load.log {
            debug!("{line}");
        }
        let count = repository.seed(load.funds);
        info!(count, path = %path.display(), "catalog loaded");
    }

    let service = Arc::new(BlendService::new(repository));

    let app = with_optimizer_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "profit mix optimizer ready");

    axum::serve(listener, app).await?;
    Ok(())
}
