use tracing::{info, instrument};

use mesh_analysis::{analyze, TriangleMesh};
use print_types::{PrintConfig, PriceEstimate};

use crate::config::{validate_print_config, PricingConfig};
use crate::ops::{estimate_cost, estimate_print_time, estimate_weight};
use crate::types::{EstimateError, Quote};

/// Full quote for a mesh: analyze -> weight -> time -> cost.
///
/// Nothing is cached; every call recomputes from the inputs, so identical
/// inputs give bit-identical results. The pricing table is checked on every
/// call since its fields are public.
#[instrument(
    skip(mesh, config, pricing),
    fields(
        material = %config.material,
        infill = config.infill_percent,
        layer_height = config.layer_height_mm
    )
)]
pub fn estimate(
    mesh: &TriangleMesh,
    config: &PrintConfig,
    pricing: &PricingConfig,
) -> Result<Quote, EstimateError> {
    validate_print_config(config)?;
    pricing.validate()?;
    pricing.material(config.material)?;

    let statistics = analyze(mesh)?;
    let estimate = estimate_from_volume(statistics.volume_cubic_mm, config, pricing)?;

    info!(
        volume_cubic_mm = statistics.volume_cubic_mm,
        weight_grams = estimate.weight_grams,
        hours = estimate.print_time_hours,
        total = estimate.total_cost,
        "quote computed"
    );

    Ok(Quote {
        statistics,
        estimate,
    })
}

/// The estimator half of the pipeline, for callers that already know the volume.
pub fn estimate_from_volume(
    volume_cubic_mm: f64,
    config: &PrintConfig,
    pricing: &PricingConfig,
) -> Result<PriceEstimate, EstimateError> {
    validate_print_config(config)?;
    pricing.validate()?;
    if !volume_cubic_mm.is_finite() || volume_cubic_mm < 0.0 {
        return Err(EstimateError::NonFiniteVolume {
            volume: volume_cubic_mm,
        });
    }

    let spec = pricing.material(config.material)?;
    let weight = estimate_weight(volume_cubic_mm, config.material, config.infill_percent, pricing)?;
    let hours = estimate_print_time(weight, config.layer_height_mm, pricing)?;
    estimate_cost(weight, hours, spec.price_per_gram, pricing)
}

/// Price estimator bound to one pricing configuration.
#[derive(Debug, Clone, Default)]
pub struct PriceEstimator {
    pricing: PricingConfig,
}

impl PriceEstimator {
    pub fn new(pricing: PricingConfig) -> Result<Self, EstimateError> {
        pricing.validate()?;
        Ok(Self { pricing })
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn quote(&self, mesh: &TriangleMesh, config: &PrintConfig) -> Result<Quote, EstimateError> {
        estimate(mesh, config, &self.pricing)
    }
}
