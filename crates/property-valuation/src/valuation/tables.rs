//! Fixed pricing constants and multiplier tables.
//!
//! Lookups are exact and case-sensitive. A key missing from a table is the
//! ordinary case for most listings and resolves to `None`; the engine then
//! leaves the price untouched (an implicit multiplier of 1).

use super::domain::PropertyType;
use serde::Serialize;

/// Currency units per unit of entered area. Historically labelled "per square
/// foot" although the form collects square metres; the product is kept as-is.
pub const BASE_RATE: f64 = 5000.0;

pub const BEDROOM_STEP: f64 = 0.1;
pub const BATHROOM_STEP: f64 = 0.05;

pub const VARIATION_FLOOR: f64 = 0.9;
pub const VARIATION_SPAN: f64 = 0.2;

const LOCATION_MULTIPLIERS: [(&str, f64); 6] = [
    ("Chennai", 1.2),
    ("Mumbai", 2.0),
    ("Delhi", 1.8),
    ("Bangalore", 1.7),
    ("Pune", 1.4),
    ("Hyderabad", 1.5),
];

pub fn location_multiplier(city: &str) -> Option<f64> {
    LOCATION_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, factor)| *factor)
}

pub fn property_type_multiplier(property_type: &PropertyType) -> Option<f64> {
    match property_type {
        PropertyType::Apartment => Some(1.0),
        PropertyType::Villa => Some(1.6),
        PropertyType::House => Some(1.4),
        PropertyType::Flat => Some(1.1),
        PropertyType::Other(_) => None,
    }
}

pub fn bedroom_multiplier(bedrooms: u32) -> f64 {
    1.0 + f64::from(bedrooms) * BEDROOM_STEP
}

pub fn bathroom_multiplier(bathrooms: u32) -> f64 {
    1.0 + f64::from(bathrooms) * BATHROOM_STEP
}

/// Maps a unit sample in `[0, 1)` onto the `[0.9, 1.1)` variation band.
pub fn variation_factor(unit_sample: f64) -> f64 {
    VARIATION_FLOOR + unit_sample * VARIATION_SPAN
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplierEntry {
    pub key: String,
    pub multiplier: f64,
}

/// Snapshot of every table, used to populate selection controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplierTables {
    pub base_rate: f64,
    pub bedroom_step: f64,
    pub bathroom_step: f64,
    pub locations: Vec<MultiplierEntry>,
    pub property_types: Vec<MultiplierEntry>,
}

impl MultiplierTables {
    pub fn snapshot() -> Self {
        let locations = LOCATION_MULTIPLIERS
            .iter()
            .map(|(name, multiplier)| MultiplierEntry {
                key: (*name).to_string(),
                multiplier: *multiplier,
            })
            .collect();

        let property_types = PropertyType::known()
            .into_iter()
            .filter_map(|kind| {
                property_type_multiplier(&kind).map(|multiplier| MultiplierEntry {
                    key: kind.label().to_string(),
                    multiplier,
                })
            })
            .collect();

        Self {
            base_rate: BASE_RATE,
            bedroom_step: BEDROOM_STEP,
            bathroom_step: BATHROOM_STEP,
            locations,
            property_types,
        }
    }
}
