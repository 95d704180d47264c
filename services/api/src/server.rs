use crate::cli::ServeArgs;
use crate::infra::{seed_demo_data, AppState, InMemoryStores};
use crate::routes::with_admin_routes;
use atlas_admin::config::AppConfig;
use atlas_admin::error::{AppError, InternalError};
use atlas_admin::events::QrRenderer;
use atlas_admin::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = InMemoryStores::default();
    if config.storage.seed_demo_data {
        seed_demo_data(&stores).map_err(InternalError::from_cause)?;
        info!("demo data seeded");
    }

    let app = with_admin_routes(&stores, QrRenderer::new(config.qr))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "atlas admin service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
