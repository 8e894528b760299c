use super::common::*;
use std::io::Write;

use crate::valuation::batch::{BatchEstimator, BatchImportError};
use crate::valuation::domain::{PropertyType, ValuationResult};

const EXPORT: &str = "Location,Bedrooms,Bathrooms,Area (sq.m),Property Type
\"123 Anna Salai, Chennai\",2,2,100,Apartment
Unknown City, 2 , 2 ,100,
\"Koregaon Park, Pune\",3,,90,House
Delhi,-1,1,50,Villa
Gachibowli,1,1,0,Studio
";

#[test]
fn estimates_each_listing_row() {
    let estimator = BatchEstimator::new(engine());
    let report = estimator
        .estimate_reader(EXPORT.as_bytes(), &mut neutral())
        .expect("csv parses");

    assert_eq!(report.total_rows(), 5);
    assert_eq!(report.estimates.len(), 3);

    let chennai = &report.estimates[0];
    assert_eq!(chennai.row, 1);
    assert_eq!(chennai.estimate, ValuationResult(792_000));
    assert_eq!(chennai.formatted, "₹7,92,000");

    let unknown = &report.estimates[1];
    assert_eq!(unknown.property_type, PropertyType::Apartment);
    assert_eq!(unknown.estimate, ValuationResult(660_000));

    let studio = &report.estimates[2];
    assert_eq!(studio.row, 5);
    assert_eq!(studio.property_type, PropertyType::Other("Studio".to_string()));
    assert_eq!(studio.estimate, ValuationResult(0));
}

#[test]
fn skipped_rows_explain_the_problem() {
    let estimator = BatchEstimator::default();
    let report = estimator
        .estimate_reader(EXPORT.as_bytes(), &mut neutral())
        .expect("csv parses");

    let rows: Vec<usize> = report.skipped.iter().map(|skip| skip.row).collect();
    assert_eq!(rows, vec![3, 4]);
    assert!(report.skipped[0].reason.contains("Bathrooms"));
    assert!(report.skipped[1].reason.contains("must not be negative"));
}

#[test]
fn reads_exports_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "valuation-batch-{}.csv",
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(EXPORT.as_bytes()).expect("write export");
    }

    let report = BatchEstimator::default()
        .estimate_path(&path, &mut neutral())
        .expect("export imports");
    std::fs::remove_file(&path).ok();

    assert_eq!(report.estimates.len(), 3);
}

#[test]
fn missing_export_is_an_io_error() {
    let err = BatchEstimator::default()
        .estimate_path("/definitely/not/here.csv", &mut neutral())
        .expect_err("file is missing");
    assert!(matches!(err, BatchImportError::Io(_)));
}
