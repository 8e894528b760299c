use serde::{Deserialize, Serialize};
use std::fmt;

/// Property categories offered by the listing form's selection control.
///
/// Tags outside the known four are carried through untouched so callers can
/// pass whatever the form produced; they simply receive no type multiplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    House,
    Flat,
    Other(String),
}

impl PropertyType {
    pub const fn known() -> [Self; 4] {
        [Self::Apartment, Self::Villa, Self::House, Self::Flat]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Apartment => "Apartment",
            Self::Villa => "Villa",
            Self::House => "House",
            Self::Flat => "Flat",
            Self::Other(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Apartment" => Self::Apartment,
            "Villa" => Self::Villa,
            "House" => Self::House,
            "Flat" => Self::Flat,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        match value {
            PropertyType::Other(tag) => tag,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated input for a single estimation call.
///
/// Built fresh from the form on every call. Fields are public so trusted
/// callers can skip the form, in which case the engine still guards against
/// non-finite or negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: f64,
    pub property_type: PropertyType,
}

impl ValuationRequest {
    /// Segment after the last comma, trimmed. `None` when that segment is blank.
    pub fn city(&self) -> Option<&str> {
        city_from_location(&self.location)
    }
}

pub fn city_from_location(location: &str) -> Option<&str> {
    let city = location.rsplit(',').next().unwrap_or_default().trim();
    if city.is_empty() {
        None
    } else {
        Some(city)
    }
}

/// Rounded price estimate in whole currency units. Zero doubles as the
/// degraded outcome, so callers track "not yet computed" separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuationResult(pub u64);

impl ValuationResult {
    pub const DEGRADED: Self = Self(0);

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<ValuationResult> for u64 {
    fn from(value: ValuationResult) -> Self {
        value.0
    }
}

impl fmt::Display for ValuationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
