use super::domain::{ValuationRequest, ValuationResult};
use super::form::{FormError, ValuationForm};
use serde::Serialize;

/// Lifecycle of the estimate shown next to the form.
///
/// `Ready(ValuationResult(0))` is a computed, degraded estimate and is never
/// confused with `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "estimate", rename_all = "snake_case")]
pub enum EstimateStatus {
    #[default]
    Idle,
    Pending,
    Ready(ValuationResult),
}

impl EstimateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pending => "Estimating",
            Self::Ready(_) => "Ready",
        }
    }

    pub const fn result(self) -> Option<ValuationResult> {
        match self {
            Self::Ready(result) => Some(result),
            Self::Idle | Self::Pending => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("an estimate is already in flight")]
    AlreadyPending,
    #[error("no estimate is in flight")]
    NotPending,
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Form plus the status of its most recent estimate.
#[derive(Debug, Clone, Default)]
pub struct PredictionPanel {
    form: ValuationForm,
    status: EstimateStatus,
}

impl PredictionPanel {
    pub fn new(form: ValuationForm) -> Self {
        Self {
            form,
            status: EstimateStatus::Idle,
        }
    }

    pub fn form(&self) -> &ValuationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ValuationForm {
        &mut self.form
    }

    pub fn status(&self) -> EstimateStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == EstimateStatus::Pending
    }

    /// Starts an estimate. The form is left untouched when it is incomplete
    /// or another estimate is still running.
    pub fn begin(&mut self) -> Result<ValuationRequest, PanelError> {
        if self.is_pending() {
            return Err(PanelError::AlreadyPending);
        }
        let request = self.form.to_request()?;
        self.status = EstimateStatus::Pending;
        Ok(request)
    }

    pub fn complete(&mut self, result: ValuationResult) -> Result<(), PanelError> {
        if !self.is_pending() {
            return Err(PanelError::NotPending);
        }
        self.status = EstimateStatus::Ready(result);
        Ok(())
    }
}
