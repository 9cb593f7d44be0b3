//! Pricing configuration: material catalogue, rates and the throughput model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use print_types::{MaterialKind, PrintConfig};

use crate::types::EstimateError;

/// Physical and commercial properties of one filament.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Grams per cubic centimetre.
    pub density_g_per_cm3: f64,
    /// Currency units per gram.
    pub price_per_gram: f64,
}

impl MaterialSpec {
    pub const fn new(density_g_per_cm3: f64, price_per_gram: f64) -> Self {
        Self {
            density_g_per_cm3,
            price_per_gram,
        }
    }
}

/// Rates and constants used by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub materials: BTreeMap<MaterialKind, MaterialSpec>,
    /// Machine time, currency units per hour.
    pub rate_per_hour: u64,
    /// Charged once per order.
    pub setup_fee: u64,
    /// Grams deposited per hour at the reference layer height.
    pub baseline_grams_per_hour: f64,
    pub reference_layer_height_mm: f64,
    /// Share of the part that is always solid (walls, top and bottom), in `[0, 1]`.
    pub shell_fraction: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let materials = BTreeMap::from([
            (MaterialKind::Pla, MaterialSpec::new(1.24, 2.0)),
            (MaterialKind::Petg, MaterialSpec::new(1.27, 3.0)),
            (MaterialKind::Tpu, MaterialSpec::new(1.21, 4.0)),
        ]);
        Self {
            materials,
            rate_per_hour: 50,
            setup_fee: 50,
            baseline_grams_per_hour: 4.0,
            reference_layer_height_mm: 0.2,
            shell_fraction: 0.2,
        }
    }
}

impl PricingConfig {
    /// Catalogue and rates of the storefront's custom-print page.
    pub fn storefront() -> Self {
        Self::default()
    }

    /// Same rates, but with a single material price overridden.
    pub fn with_material(mut self, kind: MaterialKind, spec: MaterialSpec) -> Self {
        self.materials.insert(kind, spec);
        self
    }

    /// Load a pricing override from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EstimateError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EstimateError::invalid(format!("pricing json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn material(&self, kind: MaterialKind) -> Result<&MaterialSpec, EstimateError> {
        self.materials
            .get(&kind)
            .ok_or_else(|| EstimateError::UnknownMaterial {
                name: kind.as_str().to_string(),
            })
    }

    pub fn validate(&self) -> Result<(), EstimateError> {
        if !(self.baseline_grams_per_hour > 0.0 && self.baseline_grams_per_hour.is_finite()) {
            return Err(EstimateError::invalid(format!(
                "baseline throughput must be positive, got {}",
                self.baseline_grams_per_hour
            )));
        }
        if !(self.reference_layer_height_mm > 0.0 && self.reference_layer_height_mm.is_finite()) {
            return Err(EstimateError::invalid(format!(
                "reference layer height must be positive, got {}",
                self.reference_layer_height_mm
            )));
        }
        if !(0.0..=1.0).contains(&self.shell_fraction) {
            return Err(EstimateError::invalid(format!(
                "shell fraction must be within [0, 1], got {}",
                self.shell_fraction
            )));
        }
        for (kind, spec) in &self.materials {
            if !(spec.density_g_per_cm3 > 0.0 && spec.density_g_per_cm3.is_finite()) {
                return Err(EstimateError::invalid(format!(
                    "{kind} density must be positive, got {}",
                    spec.density_g_per_cm3
                )));
            }
            if !(spec.price_per_gram > 0.0 && spec.price_per_gram.is_finite()) {
                return Err(EstimateError::invalid(format!(
                    "{kind} price must be positive, got {}",
                    spec.price_per_gram
                )));
            }
        }
        Ok(())
    }
}

/// Check a user print configuration before it reaches the estimator.
pub fn validate_print_config(config: &PrintConfig) -> Result<(), EstimateError> {
    if config.infill_percent > 100 {
        return Err(EstimateError::invalid(format!(
            "infill must be within [0, 100], got {}",
            config.infill_percent
        )));
    }
    check_layer_height(config.layer_height_mm)
}

pub(crate) fn check_layer_height(layer_height_mm: f64) -> Result<(), EstimateError> {
    if layer_height_mm > 0.0 && layer_height_mm.is_finite() {
        Ok(())
    } else {
        Err(EstimateError::invalid(format!(
            "layer height must be positive, got {layer_height_mm}"
        )))
    }
}
