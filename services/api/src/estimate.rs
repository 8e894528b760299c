use crate::infra::{variation_source, EstimatorService};
use clap::Args;
use property_valuation::config::AppConfig;
use property_valuation::error::AppError;
use property_valuation::telemetry;
use property_valuation::valuation::{
    format_inr, BatchReport, EstimateView, NumericField, PanelError, PredictionPanel,
    PropertyType, ValuationOutcome, ValuationRequest, ValuationResult,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Pause the listing page shows before revealing a prediction.
const LISTING_PAGE_LATENCY: Duration = Duration::from_millis(1500);

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Free-text address; the part after the last comma is used as the city
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Number of bedrooms
    #[arg(long, default_value = "2", allow_hyphen_values = true)]
    pub(crate) bedrooms: String,
    /// Number of bathrooms
    #[arg(long, default_value = "2", allow_hyphen_values = true)]
    pub(crate) bathrooms: String,
    /// Floor area in square metres
    #[arg(long, default_value = "1000", allow_hyphen_values = true)]
    pub(crate) area: String,
    /// Apartment, Villa, House or Flat
    #[arg(long, default_value = "Apartment")]
    pub(crate) property_type: String,
    /// Seed the price variation for a reproducible estimate
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Wait as long as the listing page does before answering
    #[arg(long)]
    pub(crate) simulate_latency: bool,
    /// Show how each factor contributed to the price
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print the estimate as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with Location, Bedrooms, Bathrooms, Area (sq.m) and Property Type columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Seed the price variation for reproducible estimates
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let delay = if args.simulate_latency {
        LISTING_PAGE_LATENCY
    } else {
        config.valuation.simulated_delay
    };
    let service = EstimatorService::with_delay(
        variation_source(args.seed, config.valuation.variation_seed),
        delay,
    );

    let mut panel = PredictionPanel::default();
    apply_arguments(&mut panel, &args);

    let request = match panel.begin() {
        Ok(request) => request,
        Err(PanelError::Form(err)) => {
            println!("Cannot estimate yet: {err}");
            return Ok(());
        }
        Err(err) => {
            println!("Cannot estimate: {err}");
            return Ok(());
        }
    };

    if !args.json && !delay.is_zero() {
        println!("{}...", panel.status().label());
    }

    let outcome = service.estimate(&request).await;
    if panel.complete(outcome.estimate).is_err() {
        warn!("estimate completed without a pending request");
    }

    if args.json {
        let view = EstimateView::new(&request, outcome, args.explain);
        serde_json::to_writer_pretty(std::io::stdout(), &view).map_err(std::io::Error::from)?;
        println!();
        return Ok(());
    }

    render_estimate(&request, outcome.estimate);
    if let Some(note) = zero_estimate_note(&outcome) {
        println!("{note}");
    }
    if args.explain {
        println!("\nPrice breakdown");
        for component in &outcome.components {
            println!(
                "- {}: x{:.4} ({})",
                component.factor.label(),
                component.multiplier,
                component.notes
            );
        }
    }

    Ok(())
}

/// Feeds the arguments through the form one field at a time, the way the
/// listing page does. Invalid numbers keep the form's previous value.
fn apply_arguments(panel: &mut PredictionPanel, args: &EstimateArgs) {
    let form = panel.form_mut();
    form.set_location(args.location.clone());
    form.set_property_type(PropertyType::from_tag(&args.property_type));

    for (field, raw) in [
        (NumericField::Bedrooms, &args.bedrooms),
        (NumericField::Bathrooms, &args.bathrooms),
        (NumericField::AreaSqm, &args.area),
    ] {
        if let Err(rejected) = form.edit(field, raw) {
            let kept = form
                .state(field)
                .committed()
                .map(|value| value.to_string())
                .unwrap_or_else(|| "nothing".to_string());
            println!("Ignoring {rejected}; keeping {kept}");
        }
    }
}

fn zero_estimate_note(outcome: &ValuationOutcome) -> Option<String> {
    if !outcome.estimate.is_zero() {
        return None;
    }
    Some(match outcome.fault {
        Some(fault) => format!("The estimate could not be computed from these inputs: {fault}."),
        None => "The price for this area rounds to zero.".to_string(),
    })
}

fn render_estimate(request: &ValuationRequest, estimate: ValuationResult) {
    println!("Property price estimate");
    match request.city() {
        Some(city) => println!("Location: {} (city: {city})", request.location.trim()),
        None => println!("Location: not specified"),
    }
    println!(
        "Property: {}, {} bed / {} bath, {} sq.m",
        request.property_type, request.bedrooms, request.bathrooms, request.area_sqm
    );
    println!("Estimated price: {}", format_inr(estimate));
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let service = EstimatorService::with_delay(
        variation_source(args.seed, config.valuation.variation_seed),
        Duration::ZERO,
    );
    let file = std::fs::File::open(&args.csv)?;
    let report = service.estimate_batch(file)?;

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout(), &report).map_err(std::io::Error::from)?;
        println!();
    } else {
        render_batch(&args.csv, &report);
    }

    Ok(())
}

fn render_batch(path: &std::path::Path, report: &BatchReport) {
    println!("Batch estimate for {}", path.display());
    println!(
        "{} row(s): {} estimated, {} skipped",
        report.total_rows(),
        report.estimates.len(),
        report.skipped.len()
    );

    if !report.estimates.is_empty() {
        println!("\nEstimates");
        for estimate in &report.estimates {
            let location = if estimate.location.trim().is_empty() {
                "(no location)"
            } else {
                estimate.location.trim()
            };
            println!(
                "- row {}: {} | {} | {}",
                estimate.row, location, estimate.property_type, estimate.formatted
            );
        }
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped rows");
        for skipped in &report.skipped {
            println!("- row {}: {}", skipped.row, skipped.reason);
        }
    }
}
