use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the unit sample behind the per-estimate variation factor.
///
/// Implementations must return values in `[0, 1)`; anything else is clamped by
/// the engine.
pub trait VariationSource {
    fn unit_sample(&mut self) -> f64;
}

impl<V: VariationSource + ?Sized> VariationSource for &mut V {
    fn unit_sample(&mut self) -> f64 {
        (**self).unit_sample()
    }
}

impl<V: VariationSource + ?Sized> VariationSource for Box<V> {
    fn unit_sample(&mut self) -> f64 {
        (**self).unit_sample()
    }
}

/// Random variation backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngVariation<R> {
    rng: R,
}

impl<R: Rng> RngVariation<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// Generator used by the service and the CLI.
pub type StdVariation = RngVariation<StdRng>;

impl RngVariation<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> VariationSource for RngVariation<R> {
    fn unit_sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Constant sample, for reproducible estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVariation(pub f64);

impl FixedVariation {
    /// Sample that maps to a variation factor of exactly 1.
    pub const fn neutral() -> Self {
        Self(0.5)
    }

    pub const fn lowest() -> Self {
        Self(0.0)
    }
}

impl VariationSource for FixedVariation {
    fn unit_sample(&mut self) -> f64 {
        self.0
    }
}
