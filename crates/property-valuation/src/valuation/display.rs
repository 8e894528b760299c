use super::domain::{PropertyType, ValuationRequest, ValuationResult};
use super::engine::{PriceComponent, ValuationFault, ValuationOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const RUPEE_SIGN: char = '₹';

/// Groups digits the en-IN way: the last three, then pairs (`7,92,000`).
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

pub fn format_inr(result: ValuationResult) -> String {
    format!("{RUPEE_SIGN}{}", group_indian(result.value()))
}

/// Serializable estimate handed to the HTTP and CLI renderers.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateView {
    pub estimate: ValuationResult,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub property_type: PropertyType,
    pub pre_variation_price: f64,
    pub variation_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<PriceComponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<ValuationFault>,
    pub estimated_at: DateTime<Utc>,
}

impl EstimateView {
    pub fn new(request: &ValuationRequest, outcome: ValuationOutcome, explain: bool) -> Self {
        Self {
            estimate: outcome.estimate,
            formatted: format_inr(outcome.estimate),
            city: request.city().map(str::to_string),
            property_type: request.property_type.clone(),
            pre_variation_price: outcome.pre_variation_price.round(),
            variation_factor: outcome.variation_factor,
            components: explain.then_some(outcome.components),
            fault: outcome.fault,
            estimated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_like_en_in_locale() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1_000), "1,000");
        assert_eq!(group_indian(12_345), "12,345");
        assert_eq!(group_indian(792_000), "7,92,000");
        assert_eq!(group_indian(10_000_000), "1,00,00,000");
        assert_eq!(group_indian(123_456_789), "12,34,56,789");
    }

    #[test]
    fn prefixes_rupee_sign() {
        assert_eq!(format_inr(ValuationResult(660_000)), "₹6,60,000");
    }
}
