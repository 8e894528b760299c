//! Write-time validation for the prediction form.
//!
//! Every numeric input is a two-state machine, `Empty` or `Committed(value)`.
//! An edit either moves it to `Empty` (blank text), moves it to a new
//! committed value (a finite, non-negative number), or is rejected and leaves
//! the previous state in place. Reading the form therefore never has to
//! re-validate anything.

use super::domain::{PropertyType, ValuationRequest};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Numeric inputs on the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Bedrooms,
    Bathrooms,
    AreaSqm,
}

impl NumericField {
    pub const fn ordered() -> [Self; 3] {
        [Self::Bedrooms, Self::Bathrooms, Self::AreaSqm]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bedrooms => "Bedrooms",
            Self::Bathrooms => "Bathrooms",
            Self::AreaSqm => "Area (sq.m)",
        }
    }

    /// Whether the field holds a whole-number count.
    pub const fn is_count(self) -> bool {
        matches!(self, Self::Bedrooms | Self::Bathrooms)
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldState {
    Empty,
    Committed(f64),
}

impl FieldState {
    pub fn committed(self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Committed(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("not a number")]
    NotANumber,
    #[error("must be a finite number")]
    NotFinite,
    #[error("must not be negative")]
    Negative,
    #[error("too large for a room count")]
    TooLarge,
}

/// An edit that was refused; the field kept its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: '{raw}' rejected ({reason})")]
pub struct EditRejected {
    pub field: NumericField,
    pub raw: String,
    pub reason: RejectReason,
}

/// Raised when the form still has numeric inputs without a committed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form incomplete: {}", join_labels(.fields))]
    Incomplete { fields: Vec<NumericField> },
}

/// Why a one-shot raw submission could not become a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRejection {
    pub rejected: Vec<EditRejected>,
    pub incomplete: Vec<NumericField>,
}

impl fmt::Display for FormRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.rejected.is_empty() {
            let rejected = self
                .rejected
                .iter()
                .map(|rejection| rejection.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            parts.push(format!("rejected {rejected}"));
        }
        if !self.incomplete.is_empty() {
            parts.push(format!("missing {}", join_labels(&self.incomplete)));
        }
        write!(f, "invalid valuation form: {}", parts.join(", "))
    }
}

impl std::error::Error for FormRejection {}

fn join_labels(fields: &[NumericField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a raw numeric edit. `Ok(None)` means the text is blank.
pub fn parse_numeric(field: NumericField, raw: &str) -> Result<Option<f64>, EditRejected> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let reject = |reason| EditRejected {
        field,
        raw: raw.to_string(),
        reason,
    };

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| reject(RejectReason::NotANumber))?;
    if !value.is_finite() {
        return Err(reject(RejectReason::NotFinite));
    }
    if value < 0.0 {
        return Err(reject(RejectReason::Negative));
    }
    if field.is_count() && value.trunc() > f64::from(u32::MAX) {
        return Err(reject(RejectReason::TooLarge));
    }

    // folds -0.0 into 0.0
    Ok(Some(value + 0.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NumericInput {
    field: NumericField,
    state: FieldState,
}

impl NumericInput {
    fn empty(field: NumericField) -> Self {
        Self {
            field,
            state: FieldState::Empty,
        }
    }

    fn committed(field: NumericField, value: f64) -> Self {
        Self {
            field,
            state: FieldState::Committed(value),
        }
    }

    fn edit(&mut self, raw: &str) -> Result<FieldState, EditRejected> {
        self.state = match parse_numeric(self.field, raw)? {
            Some(value) => FieldState::Committed(value),
            None => FieldState::Empty,
        };
        Ok(self.state)
    }
}

/// Current state of the prediction form, owned by whoever renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationForm {
    location: String,
    bedrooms: NumericInput,
    bathrooms: NumericInput,
    area_sqm: NumericInput,
    property_type: PropertyType,
}

impl Default for ValuationForm {
    /// Starting values of the listing page's form: 2 bed, 2 bath, 1000 sq.m
    /// apartment with no location.
    fn default() -> Self {
        Self {
            location: String::new(),
            bedrooms: NumericInput::committed(NumericField::Bedrooms, 2.0),
            bathrooms: NumericInput::committed(NumericField::Bathrooms, 2.0),
            area_sqm: NumericInput::committed(NumericField::AreaSqm, 1000.0),
            property_type: PropertyType::Apartment,
        }
    }
}

impl ValuationForm {
    pub fn blank() -> Self {
        Self {
            location: String::new(),
            bedrooms: NumericInput::empty(NumericField::Bedrooms),
            bathrooms: NumericInput::empty(NumericField::Bathrooms),
            area_sqm: NumericInput::empty(NumericField::AreaSqm),
            property_type: PropertyType::Apartment,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    pub fn state(&self, field: NumericField) -> FieldState {
        self.input(field).state
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_property_type(&mut self, property_type: PropertyType) {
        self.property_type = property_type;
    }

    /// Applies a raw text edit to a numeric input, returning its new state.
    pub fn edit(&mut self, field: NumericField, raw: &str) -> Result<FieldState, EditRejected> {
        self.input_mut(field).edit(raw)
    }

    pub fn incomplete_fields(&self) -> Vec<NumericField> {
        NumericField::ordered()
            .into_iter()
            .filter(|field| self.state(*field) == FieldState::Empty)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.incomplete_fields().is_empty()
    }

    /// Snapshot of the committed values. Counts drop any fractional part.
    pub fn to_request(&self) -> Result<ValuationRequest, FormError> {
        match (
            self.bedrooms.state.committed(),
            self.bathrooms.state.committed(),
            self.area_sqm.state.committed(),
        ) {
            (Some(bedrooms), Some(bathrooms), Some(area_sqm)) => Ok(ValuationRequest {
                location: self.location.clone(),
                bedrooms: whole_count(bedrooms),
                bathrooms: whole_count(bathrooms),
                area_sqm,
                property_type: self.property_type.clone(),
            }),
            _ => Err(FormError::Incomplete {
                fields: self.incomplete_fields(),
            }),
        }
    }

    /// Replays a full raw submission onto a blank form.
    pub fn from_raw(raw: &RawValuationForm) -> Result<ValuationRequest, FormRejection> {
        let mut form = Self::blank();
        form.set_location(raw.location.clone());
        form.set_property_type(PropertyType::from_tag(&raw.property_type));

        let rejected: Vec<EditRejected> = [
            (NumericField::Bedrooms, raw.bedrooms.as_str()),
            (NumericField::Bathrooms, raw.bathrooms.as_str()),
            (NumericField::AreaSqm, raw.area_sqm.as_str()),
        ]
        .into_iter()
        .filter_map(|(field, value)| form.edit(field, value).err())
        .collect();

        let incomplete: Vec<NumericField> = form
            .incomplete_fields()
            .into_iter()
            .filter(|field| !rejected.iter().any(|rejection| rejection.field == *field))
            .collect();

        if !rejected.is_empty() || !incomplete.is_empty() {
            return Err(FormRejection {
                rejected,
                incomplete,
            });
        }

        form.to_request().map_err(|FormError::Incomplete { fields }| FormRejection {
            rejected: Vec::new(),
            incomplete: fields,
        })
    }

    fn input(&self, field: NumericField) -> &NumericInput {
        match field {
            NumericField::Bedrooms => &self.bedrooms,
            NumericField::Bathrooms => &self.bathrooms,
            NumericField::AreaSqm => &self.area_sqm,
        }
    }

    fn input_mut(&mut self, field: NumericField) -> &mut NumericInput {
        match field {
            NumericField::Bedrooms => &mut self.bedrooms,
            NumericField::Bathrooms => &mut self.bathrooms,
            NumericField::AreaSqm => &mut self.area_sqm,
        }
    }
}

/// Committed counts are at most `u32::MAX` once truncated.
fn whole_count(value: f64) -> u32 {
    value.trunc() as u32
}

/// Form values exactly as typed. Numeric inputs also accept JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawValuationForm {
    pub location: String,
    #[serde(deserialize_with = "string_or_number")]
    pub bedrooms: String,
    #[serde(deserialize_with = "string_or_number")]
    pub bathrooms: String,
    #[serde(alias = "area", deserialize_with = "string_or_number")]
    pub area_sqm: String,
    pub property_type: String,
}

impl Default for RawValuationForm {
    fn default() -> Self {
        Self {
            location: String::new(),
            bedrooms: String::new(),
            bathrooms: String::new(),
            area_sqm: String::new(),
            property_type: PropertyType::Apartment.label().to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Missing(()) => String::new(),
    })
}
