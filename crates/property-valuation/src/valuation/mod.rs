//! Price estimation for rental listings.
//!
//! Raw form edits pass through [`ValuationForm`], which only ever holds valid
//! committed values. A complete form yields a [`ValuationRequest`], and
//! [`ValuationEngine`] turns that into a [`ValuationResult`] by multiplying a
//! base rate with location, property type, bedroom, bathroom and random
//! variation factors. The engine never fails: anything that would produce a
//! non-finite price collapses to zero instead.

pub mod batch;
pub mod display;
pub mod domain;
pub mod engine;
pub mod form;
pub mod panel;
pub mod router;
pub mod service;
pub mod tables;
pub mod variation;

#[cfg(test)]
mod tests;

pub use batch::{BatchEstimate, BatchEstimator, BatchImportError, BatchReport, SkippedRow};
pub use display::{format_inr, group_indian, EstimateView};
pub use domain::{city_from_location, PropertyType, ValuationRequest, ValuationResult};
pub use engine::{PriceComponent, PriceFactor, ValuationEngine, ValuationFault, ValuationOutcome};
pub use form::{
    EditRejected, FieldState, FormError, FormRejection, NumericField, RawValuationForm,
    RejectReason, ValuationForm,
};
pub use panel::{EstimateStatus, PanelError, PredictionPanel};
pub use router::{valuation_router, BatchPayload, EstimatePayload};
pub use service::ValuationService;
pub use tables::{MultiplierEntry, MultiplierTables, BASE_RATE};
pub use variation::{FixedVariation, RngVariation, StdVariation, VariationSource};
