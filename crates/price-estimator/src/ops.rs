//! Weight, print time and cost derivations.
//!
//! Rounding: every rounded figure uses round-half-up. The inputs are never
//! negative, so `f64::round` (half away from zero) is exactly that. Weight
//! itself is kept unrounded.

use tracing::debug;

use print_types::{MaterialKind, PriceEstimate};

use crate::config::{check_layer_height, PricingConfig};
use crate::types::EstimateError;

/// Mass fraction of a solid part that gets printed at the given infill.
///
/// The shell is always solid; the rest scales linearly with infill.
pub fn infill_multiplier(infill_percent: u8, shell_fraction: f64) -> f64 {
    shell_fraction + (infill_percent as f64 / 100.0) * (1.0 - shell_fraction)
}

/// Estimated filament weight in grams.
///
/// `infill_percent` is expected to be validated already.
pub fn estimate_weight(
    volume_cubic_mm: f64,
    material: MaterialKind,
    infill_percent: u8,
    pricing: &PricingConfig,
) -> Result<f64, EstimateError> {
    let density = pricing.material(material)?.density_g_per_cm3;
    let multiplier = infill_multiplier(infill_percent, pricing.shell_fraction);
    let weight = volume_cubic_mm * density / 1000.0 * multiplier;
    if !weight.is_finite() {
        return Err(EstimateError::out_of_range("weight", weight));
    }
    debug!(%material, density, multiplier, weight, "weight estimated");
    Ok(weight)
}

/// Estimated print time in whole hours, never less than one.
pub fn estimate_print_time(
    weight_grams: f64,
    layer_height_mm: f64,
    pricing: &PricingConfig,
) -> Result<u32, EstimateError> {
    check_layer_height(layer_height_mm)?;
    let time_multiplier = pricing.reference_layer_height_mm / layer_height_mm;
    let raw_hours = (weight_grams / pricing.baseline_grams_per_hour) * time_multiplier;
    let hours = raw_hours.round().max(1.0);
    if !raw_hours.is_finite() || hours > u32::MAX as f64 {
        return Err(EstimateError::out_of_range("print time", raw_hours));
    }
    Ok(hours as u32)
}

/// Cost breakdown for a given weight and machine time.
///
/// Fails instead of saturating when a figure does not fit the currency type.
pub fn estimate_cost(
    weight_grams: f64,
    print_time_hours: u32,
    price_per_gram: f64,
    pricing: &PricingConfig,
) -> Result<PriceEstimate, EstimateError> {
    let raw_material = (weight_grams * price_per_gram).round();
    if !(raw_material >= 0.0 && raw_material < u64::MAX as f64) {
        return Err(EstimateError::out_of_range("material cost", raw_material));
    }
    let material_cost = raw_material as u64;
    let print_cost = u64::from(print_time_hours)
        .checked_mul(pricing.rate_per_hour)
        .ok_or_else(|| {
            EstimateError::out_of_range(
                "print cost",
                print_time_hours as f64 * pricing.rate_per_hour as f64,
            )
        })?;
    let setup_fee = pricing.setup_fee;
    let total_cost = material_cost
        .checked_add(print_cost)
        .and_then(|sum| sum.checked_add(setup_fee))
        .ok_or_else(|| {
            EstimateError::out_of_range(
                "total cost",
                material_cost as f64 + print_cost as f64 + setup_fee as f64,
            )
        })?;

    Ok(PriceEstimate {
        weight_grams,
        print_time_hours,
        material_cost,
        print_cost,
        setup_fee,
        total_cost,
    })
}
