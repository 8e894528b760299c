use std::io::Read;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, warn};

use super::batch::{BatchEstimator, BatchImportError, BatchReport};
use super::domain::ValuationRequest;
use super::engine::{ValuationEngine, ValuationOutcome};
use super::form::{FormRejection, RawValuationForm, ValuationForm};
use super::variation::VariationSource;
use crate::config::ValuationSettings;

/// Async facade over the engine shared by the HTTP routes and the CLI.
///
/// Owns the variation source and the simulated delay; each call builds its
/// own request and outcome, nothing is kept between calls.
pub struct ValuationService<V> {
    engine: ValuationEngine,
    variation: Mutex<V>,
    simulated_delay: Duration,
}

impl<V> ValuationService<V>
where
    V: VariationSource + Send + 'static,
{
    pub fn new(variation: V, settings: &ValuationSettings) -> Self {
        Self::with_delay(variation, settings.simulated_delay)
    }

    pub fn with_delay(variation: V, simulated_delay: Duration) -> Self {
        Self {
            engine: ValuationEngine::new(),
            variation: Mutex::new(variation),
            simulated_delay,
        }
    }

    pub fn simulated_delay(&self) -> Duration {
        self.simulated_delay
    }

    /// Resolves once the estimate is available; callers show a pending state
    /// until then.
    pub async fn estimate(&self, request: &ValuationRequest) -> ValuationOutcome {
        if !self.simulated_delay.is_zero() {
            tokio::time::sleep(self.simulated_delay).await;
        }

        let outcome = {
            let mut variation = self.variation();
            self.engine.appraise(request, &mut *variation)
        };

        match outcome.fault {
            Some(fault) => warn!(
                location = %request.location,
                area_sqm = request.area_sqm,
                %fault,
                "valuation degraded to zero"
            ),
            None => debug!(
                city = request.city().unwrap_or("-"),
                property_type = %request.property_type,
                estimate = outcome.estimate.value(),
                "valuation computed"
            ),
        }

        outcome
    }

    /// Normalizes a raw submission, then estimates it.
    pub async fn estimate_form(
        &self,
        raw: &RawValuationForm,
    ) -> Result<(ValuationRequest, ValuationOutcome), FormRejection> {
        let request = ValuationForm::from_raw(raw)?;
        let outcome = self.estimate(&request).await;
        Ok((request, outcome))
    }

    pub fn estimate_batch<R: Read>(&self, reader: R) -> Result<BatchReport, BatchImportError> {
        let estimator = BatchEstimator::new(self.engine);
        let mut variation = self.variation();
        let report = estimator.estimate_reader(reader, &mut *variation)?;
        debug!(
            estimated = report.estimates.len(),
            skipped = report.skipped.len(),
            "batch valuation finished"
        );
        Ok(report)
    }

    fn variation(&self) -> MutexGuard<'_, V> {
        self.variation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
