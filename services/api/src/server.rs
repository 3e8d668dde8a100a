use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryUserRepository};
use crate::routes::with_settlement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use claimscout::catalog::SettlementCatalog;
use claimscout::config::{self, AppConfig};
use claimscout::error::AppError;
use claimscout::firms::LawFirmDirectory;
use claimscout::matching::MatchingEngine;
use claimscout::service::SettlementDeskService;
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

    config::init_telemetry(&config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryUserRepository::seeded());
    let service = Arc::new(SettlementDeskService::new(
        SettlementCatalog::standard(),
        LawFirmDirectory::standard(),
        MatchingEngine::new(config.matching.floor_policy),
        repository,
    ));

    let app = with_settlement_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "settlement discovery service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
