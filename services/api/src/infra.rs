use metrics_exporter_prometheus::PrometheusHandle;
use property_valuation::valuation::{StdVariation, ValuationService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type EstimatorService = ValuationService<StdVariation>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Explicit seeds win over the configured one; otherwise the generator is
/// seeded from entropy.
pub(crate) fn variation_source(cli_seed: Option<u64>, configured: Option<u64>) -> StdVariation {
    StdVariation::from_seed_option(cli_seed.or(configured))
}
