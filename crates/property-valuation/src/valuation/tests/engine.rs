use super::common::*;
use crate::valuation::domain::{PropertyType, ValuationRequest, ValuationResult};
use crate::valuation::engine::{PriceFactor, ValuationFault};
use crate::valuation::variation::{FixedVariation, RngVariation};

#[test]
fn chennai_apartment_matches_documented_price() {
    let engine = engine();
    let request = chennai_request();

    let pre_variation = engine
        .pre_variation_price(&request)
        .expect("finite price");
    assert_close(pre_variation, 792_000.0);

    let estimate = engine.estimate(&request, &mut neutral());
    assert_eq!(estimate, ValuationResult(792_000));
}

#[test]
fn chennai_estimates_stay_within_ten_percent() {
    let engine = engine();
    let request = chennai_request();

    let lowest = engine.estimate(&request, &mut FixedVariation::lowest());
    assert_eq!(lowest, ValuationResult(712_800));

    let highest = engine.estimate(&request, &mut FixedVariation(0.999_999_999));
    assert!(highest.value() <= 871_200, "got {highest}");

    let mut source = RngVariation::seeded(11);
    for _ in 0..500 {
        let estimate = engine.estimate(&request, &mut source).value();
        assert!(
            (712_800..=871_200).contains(&estimate),
            "estimate {estimate} escaped the variation band"
        );
    }
}

#[test]
fn unknown_city_skips_location_multiplier() {
    let engine = engine();
    let request = unknown_city_request();

    let pre_variation = engine
        .pre_variation_price(&request)
        .expect("finite price");
    assert_close(pre_variation, 660_000.0);

    let mut source = RngVariation::seeded(3);
    for _ in 0..200 {
        let estimate = engine.estimate(&request, &mut source).value();
        assert!((594_000..=726_000).contains(&estimate));
    }
}

#[test]
fn empty_location_behaves_like_unknown_city() {
    let engine = engine();
    let empty = ValuationRequest {
        location: String::new(),
        ..chennai_request()
    };

    assert_eq!(
        engine.estimate(&empty, &mut neutral()),
        engine.estimate(&unknown_city_request(), &mut neutral())
    );

    let outcome = engine.appraise(&empty, &mut neutral());
    let location = outcome
        .components
        .iter()
        .find(|component| component.factor == PriceFactor::Location)
        .expect("location component recorded");
    assert_eq!(location.multiplier, 1.0);
}

#[test]
fn city_lookup_ignores_surrounding_whitespace_but_not_case() {
    let engine = engine();
    let padded = ValuationRequest {
        location: "  Bandra West ,  Mumbai  ".to_string(),
        ..chennai_request()
    };
    let lowercase = ValuationRequest {
        location: "Bandra West, mumbai".to_string(),
        ..chennai_request()
    };

    assert_close(
        engine.pre_variation_price(&padded).expect("finite"),
        100.0 * 5000.0 * 2.0 * 1.2 * 1.1,
    );
    assert_close(
        engine.pre_variation_price(&lowercase).expect("finite"),
        660_000.0,
    );
}

#[test]
fn villa_in_mumbai_composes_every_factor() {
    let engine = engine();
    let request = ValuationRequest {
        location: "Juhu, Mumbai".to_string(),
        bedrooms: 3,
        bathrooms: 1,
        area_sqm: 50.0,
        property_type: PropertyType::Villa,
    };

    assert_eq!(
        engine.estimate(&request, &mut neutral()),
        ValuationResult(1_092_000)
    );
}

#[test]
fn unrecognized_property_type_applies_no_multiplier() {
    let engine = engine();
    let request = ValuationRequest {
        property_type: PropertyType::Other("Penthouse".to_string()),
        ..chennai_request()
    };

    assert_eq!(
        engine.estimate(&request, &mut neutral()),
        engine.estimate(&chennai_request(), &mut neutral())
    );
}

#[test]
fn zero_area_always_prices_at_zero() {
    let engine = engine();
    let request = ValuationRequest {
        area_sqm: 0.0,
        location: "Mumbai".to_string(),
        property_type: PropertyType::Villa,
        bedrooms: 9,
        bathrooms: 9,
    };

    let mut source = RngVariation::seeded(99);
    for _ in 0..50 {
        let outcome = engine.appraise(&request, &mut source);
        assert_eq!(outcome.estimate, ValuationResult(0));
        assert!(!outcome.is_degraded());
    }
}

#[test]
fn non_numeric_area_degrades_to_zero() {
    let engine = engine();

    for area_sqm in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let request = ValuationRequest {
            area_sqm,
            ..chennai_request()
        };
        let outcome = engine.appraise(&request, &mut neutral());
        assert_eq!(outcome.estimate, ValuationResult(0));
        assert_eq!(outcome.fault, Some(ValuationFault::NonFiniteArea));
        assert!(engine.pre_variation_price(&request).is_none());
    }
}

#[test]
fn negative_area_that_bypassed_the_form_degrades_to_zero() {
    let engine = engine();
    let request = ValuationRequest {
        area_sqm: -40.0,
        ..chennai_request()
    };

    let outcome = engine.appraise(&request, &mut neutral());
    assert_eq!(outcome.estimate, ValuationResult(0));
    assert_eq!(outcome.fault, Some(ValuationFault::NegativeArea));
}

#[test]
fn overflowing_area_degrades_to_zero() {
    let engine = engine();
    let request = ValuationRequest {
        area_sqm: f64::MAX,
        location: "Mumbai".to_string(),
        ..chennai_request()
    };

    let outcome = engine.appraise(&request, &mut neutral());
    assert_eq!(outcome.estimate, ValuationResult(0));
    assert_eq!(outcome.fault, Some(ValuationFault::NonFinitePrice));
}

#[test]
fn prices_beyond_the_result_range_degrade_instead_of_saturating() {
    let engine = engine();
    let request = ValuationRequest {
        area_sqm: 1e20,
        ..chennai_request()
    };

    let pre_variation = engine
        .pre_variation_price(&request)
        .expect("finite price");
    assert!(pre_variation > u64::MAX as f64);

    let outcome = engine.appraise(&request, &mut neutral());
    assert_eq!(outcome.estimate, ValuationResult(0));
    assert_eq!(outcome.fault, Some(ValuationFault::PriceOutOfRange));
}

#[test]
fn large_representable_prices_keep_the_variation_band() {
    let engine = engine();
    let request = ValuationRequest {
        area_sqm: 1e12,
        ..chennai_request()
    };
    let pre_variation = engine
        .pre_variation_price(&request)
        .expect("finite price");

    for sample in [0.0, 0.5, 0.999_999] {
        let outcome = engine.appraise(&request, &mut FixedVariation(sample));
        assert_eq!(outcome.fault, None);
        let estimate = outcome.estimate.value() as f64;
        assert!(
            estimate >= pre_variation * 0.9 - 0.5 && estimate <= pre_variation * 1.1 + 0.5,
            "estimate {estimate} outside band around {pre_variation}"
        );
    }
}

#[test]
fn broken_variation_source_degrades_to_zero() {
    let engine = engine();
    let outcome = engine.appraise(&chennai_request(), &mut FixedVariation(f64::NAN));
    assert_eq!(outcome.estimate, ValuationResult(0));
    assert_eq!(outcome.fault, Some(ValuationFault::NonFiniteSample));
}

#[test]
fn out_of_range_samples_are_clamped_into_the_band() {
    let engine = engine();
    let request = chennai_request();

    let high = engine.estimate(&request, &mut FixedVariation(7.5)).value();
    let low = engine.estimate(&request, &mut FixedVariation(-3.0)).value();

    assert!(high <= 871_200);
    assert_eq!(low, 712_800);
}

#[test]
fn neutral_variation_is_reproducible() {
    let engine = engine();
    let request = chennai_request();

    let first = engine.appraise(&request, &mut neutral());
    let second = engine.appraise(&request, &mut neutral());

    assert_eq!(first, second);
    assert_close(first.variation_factor, 1.0);
}

#[test]
fn more_rooms_or_area_raise_the_price() {
    let engine = engine();
    let base = chennai_request();
    let price = |request: &ValuationRequest| {
        engine
            .pre_variation_price(request)
            .expect("finite price")
    };

    let mut previous = price(&ValuationRequest {
        bedrooms: 0,
        ..base.clone()
    });
    for bedrooms in 1..=8 {
        let current = price(&ValuationRequest {
            bedrooms,
            ..base.clone()
        });
        assert!(current > previous, "bedrooms {bedrooms} did not increase price");
        previous = current;
    }

    let mut previous = price(&ValuationRequest {
        bathrooms: 0,
        ..base.clone()
    });
    for bathrooms in 1..=8 {
        let current = price(&ValuationRequest {
            bathrooms,
            ..base.clone()
        });
        assert!(current > previous, "bathrooms {bathrooms} did not increase price");
        previous = current;
    }

    let mut previous = price(&ValuationRequest {
        area_sqm: 1.0,
        ..base.clone()
    });
    for area in [1.5, 10.0, 99.9, 100.0, 2_500.0] {
        let current = price(&ValuationRequest {
            area_sqm: area,
            ..base.clone()
        });
        assert!(current > previous, "area {area} did not increase price");
        previous = current;
    }
}

#[test]
fn appraisal_records_components_in_application_order() {
    let engine = engine();
    let outcome = engine.appraise(&chennai_request(), &mut neutral());

    let factors: Vec<PriceFactor> = outcome
        .components
        .iter()
        .map(|component| component.factor)
        .collect();
    assert_eq!(
        factors,
        vec![
            PriceFactor::BaseRate,
            PriceFactor::Location,
            PriceFactor::PropertyType,
            PriceFactor::Bedrooms,
            PriceFactor::Bathrooms,
            PriceFactor::Variation,
        ]
    );
    assert!(outcome.components[1].notes.contains("Chennai"));
    assert_close(outcome.components[3].multiplier, 1.2);
    assert_close(outcome.components[4].multiplier, 1.1);
}
