use crate::cli::ServeArgs;
use crate::infra::{variation_source, AppState, EstimatorService};
use crate::routes::with_valuation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use property_valuation::config::AppConfig;
use property_valuation::error::AppError;
use property_valuation::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let variation = variation_source(None, config.valuation.variation_seed);
    let service = Arc::new(EstimatorService::new(variation, &config.valuation));

    let app = with_valuation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        simulated_delay_ms = config.valuation.simulated_delay.as_millis() as u64,
        seeded = config.valuation.variation_seed.is_some(),
        "property price estimator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
