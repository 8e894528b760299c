use super::display::format_inr;
use super::domain::{PropertyType, ValuationResult};
use super::engine::ValuationEngine;
use super::form::{RawValuationForm, ValuationForm};
use super::variation::VariationSource;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One listing row, with numeric columns kept as raw text so the form
/// decides what is acceptable.
#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Bedrooms", default, deserialize_with = "text_or_empty")]
    bedrooms: String,
    #[serde(rename = "Bathrooms", default, deserialize_with = "text_or_empty")]
    bathrooms: String,
    #[serde(
        rename = "Area (sq.m)",
        alias = "Area",
        default,
        deserialize_with = "text_or_empty"
    )]
    area_sqm: String,
    #[serde(rename = "Property Type", default)]
    property_type: String,
}

impl ListingRow {
    fn into_raw_form(self) -> RawValuationForm {
        RawValuationForm {
            location: self.location,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area_sqm: self.area_sqm,
            property_type: if self.property_type.trim().is_empty() {
                PropertyType::Apartment.label().to_string()
            } else {
                self.property_type
            },
        }
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEstimate {
    /// 1-based data row, excluding the header.
    pub row: usize,
    pub location: String,
    pub property_type: PropertyType,
    pub estimate: ValuationResult,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub estimates: Vec<BatchEstimate>,
    pub skipped: Vec<SkippedRow>,
}

impl BatchReport {
    pub fn total_rows(&self) -> usize {
        self.estimates.len() + self.skipped.len()
    }
}

/// Runs every row of a listing export through the form and the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchEstimator {
    engine: ValuationEngine,
}

impl BatchEstimator {
    pub fn new(engine: ValuationEngine) -> Self {
        Self { engine }
    }

    pub fn estimate_path<P, V>(
        &self,
        path: P,
        variation: &mut V,
    ) -> Result<BatchReport, BatchImportError>
    where
        P: AsRef<Path>,
        V: VariationSource + ?Sized,
    {
        let file = std::fs::File::open(path)?;
        self.estimate_reader(file, variation)
    }

    /// Rows the form refuses are reported as skipped; only unreadable CSV
    /// aborts the batch.
    pub fn estimate_reader<R, V>(
        &self,
        reader: R,
        variation: &mut V,
    ) -> Result<BatchReport, BatchImportError>
    where
        R: Read,
        V: VariationSource + ?Sized,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut report = BatchReport::default();

        for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
            let row = index + 1;
            let raw = record?.into_raw_form();

            match ValuationForm::from_raw(&raw) {
                Ok(request) => {
                    let estimate = self.engine.estimate(&request, variation);
                    report.estimates.push(BatchEstimate {
                        row,
                        location: request.location,
                        property_type: request.property_type,
                        estimate,
                        formatted: format_inr(estimate),
                    });
                }
                Err(rejection) => report.skipped.push(SkippedRow {
                    row,
                    reason: rejection.to_string(),
                }),
            }
        }

        Ok(report)
    }
}
