use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::valuation::domain::{PropertyType, ValuationRequest};
use crate::valuation::engine::ValuationEngine;
use crate::valuation::router::valuation_router;
use crate::valuation::service::ValuationService;
use crate::valuation::variation::FixedVariation;

pub(super) fn chennai_request() -> ValuationRequest {
    ValuationRequest {
        location: "123 Anna Salai, Chennai".to_string(),
        bedrooms: 2,
        bathrooms: 2,
        area_sqm: 100.0,
        property_type: PropertyType::Apartment,
    }
}

pub(super) fn unknown_city_request() -> ValuationRequest {
    ValuationRequest {
        location: "Unknown City".to_string(),
        ..chennai_request()
    }
}

pub(super) fn engine() -> ValuationEngine {
    ValuationEngine::new()
}

pub(super) fn neutral() -> FixedVariation {
    FixedVariation::neutral()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn build_service() -> ValuationService<FixedVariation> {
    ValuationService::with_delay(neutral(), Duration::ZERO)
}

pub(super) fn valuation_router_with_service(
    service: ValuationService<FixedVariation>,
) -> axum::Router {
    valuation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
