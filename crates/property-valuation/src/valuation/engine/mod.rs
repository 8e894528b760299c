mod rules;

use super::domain::{ValuationRequest, ValuationResult};
use super::tables::variation_factor;
use super::variation::VariationSource;
use serde::{Deserialize, Serialize};

/// Largest unit sample accepted from a variation source.
const MAX_UNIT_SAMPLE: f64 = 1.0 - f64::EPSILON;

/// First rounded price that no longer fits in a `ValuationResult` (2^64).
const PRICE_LIMIT: f64 = u64::MAX as f64;

/// Stateless pricing model. Performs no I/O; the only outside input is the
/// variation source handed to each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationEngine;

impl ValuationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rounded estimate only. Never fails; faults collapse to zero.
    pub fn estimate<V>(&self, request: &ValuationRequest, variation: &mut V) -> ValuationResult
    where
        V: VariationSource + ?Sized,
    {
        self.appraise(request, variation).estimate
    }

    /// Price before the random variation is applied, or `None` when the
    /// request cannot produce a finite, non-negative price.
    pub fn pre_variation_price(&self, request: &ValuationRequest) -> Option<f64> {
        if check_area(request.area_sqm).is_some() {
            return None;
        }
        let price = rules::compose(request.area_sqm, &rules::price_components(request));
        (price.is_finite() && price >= 0.0).then_some(price)
    }

    /// Full estimate with the component trail that produced it.
    pub fn appraise<V>(&self, request: &ValuationRequest, variation: &mut V) -> ValuationOutcome
    where
        V: VariationSource + ?Sized,
    {
        let mut components = rules::price_components(request);

        if let Some(fault) = check_area(request.area_sqm) {
            return ValuationOutcome::degraded(components, fault);
        }

        let pre_variation_price = rules::compose(request.area_sqm, &components);
        if !pre_variation_price.is_finite() {
            return ValuationOutcome::degraded(components, ValuationFault::NonFinitePrice);
        }

        let sample = variation.unit_sample();
        if !sample.is_finite() {
            return ValuationOutcome::degraded(components, ValuationFault::NonFiniteSample);
        }
        let factor = variation_factor(sample.clamp(0.0, MAX_UNIT_SAMPLE));
        components.push(PriceComponent {
            factor: PriceFactor::Variation,
            multiplier: factor,
            notes: format!("market variation {:+.1}%", (factor - 1.0) * 100.0),
        });

        let price = (pre_variation_price * factor).round();
        if !price.is_finite() || price < 0.0 {
            return ValuationOutcome::degraded(components, ValuationFault::NonFinitePrice);
        }
        if price >= PRICE_LIMIT {
            return ValuationOutcome::degraded(components, ValuationFault::PriceOutOfRange);
        }

        ValuationOutcome {
            estimate: ValuationResult(price as u64),
            pre_variation_price,
            variation_factor: factor,
            components,
            fault: None,
        }
    }
}

fn check_area(area_sqm: f64) -> Option<ValuationFault> {
    if !area_sqm.is_finite() {
        Some(ValuationFault::NonFiniteArea)
    } else if area_sqm < 0.0 {
        Some(ValuationFault::NegativeArea)
    } else {
        None
    }
}

/// Pricing step a component was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFactor {
    BaseRate,
    Location,
    PropertyType,
    Bedrooms,
    Bathrooms,
    Variation,
}

impl PriceFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BaseRate => "Base rate",
            Self::Location => "Location",
            Self::PropertyType => "Property type",
            Self::Bedrooms => "Bedrooms",
            Self::Bathrooms => "Bathrooms",
            Self::Variation => "Market variation",
        }
    }
}

/// One multiplicative step, kept so an estimate can be explained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComponent {
    pub factor: PriceFactor,
    pub multiplier: f64,
    pub notes: String,
}

/// Reason an estimate collapsed to the zero sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValuationFault {
    #[error("area is not a finite number")]
    NonFiniteArea,
    #[error("area is negative")]
    NegativeArea,
    #[error("variation source produced a non-finite sample")]
    NonFiniteSample,
    #[error("price computation overflowed")]
    NonFinitePrice,
    #[error("price exceeds the largest representable estimate")]
    PriceOutOfRange,
}

/// Estimate plus the trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationOutcome {
    pub estimate: ValuationResult,
    pub pre_variation_price: f64,
    pub variation_factor: f64,
    pub components: Vec<PriceComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<ValuationFault>,
}

impl ValuationOutcome {
    fn degraded(components: Vec<PriceComponent>, fault: ValuationFault) -> Self {
        Self {
            estimate: ValuationResult::DEGRADED,
            pre_variation_price: 0.0,
            variation_factor: 1.0,
            components,
            fault: Some(fault),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.fault.is_some()
    }
}
