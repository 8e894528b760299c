use super::super::domain::ValuationRequest;
use super::super::tables::{
    bathroom_multiplier, bedroom_multiplier, location_multiplier, property_type_multiplier,
    BASE_RATE,
};
use super::{PriceComponent, PriceFactor};

/// Deterministic part of the model, one component per step in application
/// order. Skipped lookups are recorded with a multiplier of 1.
pub(crate) fn price_components(request: &ValuationRequest) -> Vec<PriceComponent> {
    let mut components = Vec::with_capacity(5);

    components.push(PriceComponent {
        factor: PriceFactor::BaseRate,
        multiplier: BASE_RATE,
        notes: format!("{} sq.m at {BASE_RATE} per unit", request.area_sqm),
    });

    let city = request.city();
    match city.and_then(|name| location_multiplier(name).map(|factor| (name, factor))) {
        Some((name, factor)) => components.push(PriceComponent {
            factor: PriceFactor::Location,
            multiplier: factor,
            notes: format!("{name} location premium"),
        }),
        None => components.push(PriceComponent {
            factor: PriceFactor::Location,
            multiplier: 1.0,
            notes: match city {
                Some(name) => format!("no location multiplier for '{name}'"),
                None => "no city given".to_string(),
            },
        }),
    }

    let property_type = &request.property_type;
    components.push(match property_type_multiplier(property_type) {
        Some(factor) => PriceComponent {
            factor: PriceFactor::PropertyType,
            multiplier: factor,
            notes: format!("{property_type} rate"),
        },
        None => PriceComponent {
            factor: PriceFactor::PropertyType,
            multiplier: 1.0,
            notes: format!("no multiplier for property type '{property_type}'"),
        },
    });

    components.push(PriceComponent {
        factor: PriceFactor::Bedrooms,
        multiplier: bedroom_multiplier(request.bedrooms),
        notes: format!("{} bedroom(s)", request.bedrooms),
    });

    components.push(PriceComponent {
        factor: PriceFactor::Bathrooms,
        multiplier: bathroom_multiplier(request.bathrooms),
        notes: format!("{} bathroom(s)", request.bathrooms),
    });

    components
}

/// Applies the components left to right, starting from the entered area.
pub(crate) fn compose(area_sqm: f64, components: &[PriceComponent]) -> f64 {
    components
        .iter()
        .fold(area_sqm, |price, component| price * component.multiplier)
}
