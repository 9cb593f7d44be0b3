//! Derived records handed to the display layer.

use serde::{Deserialize, Serialize};

/// Geometric summary of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStatistics {
    /// Enclosed volume in cubic millimetres. Never negative.
    pub volume_cubic_mm: f64,
    /// Bounding box extent per axis (mm).
    pub bounding_size: [f64; 3],
    /// Bounding box center (mm).
    pub bounding_center: [f64; 3],
    pub triangle_count: usize,
}

impl ModelStatistics {
    pub fn volume_cubic_cm(&self) -> f64 {
        self.volume_cubic_mm / 1000.0
    }
}

/// Weight, time and cost breakdown for one print.
///
/// Currency figures are whole units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub weight_grams: f64,
    pub print_time_hours: u32,
    pub material_cost: u64,
    pub print_cost: u64,
    pub setup_fee: u64,
    pub total_cost: u64,
}

/// Scale and translation that fit a model into the preview viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportFit {
    pub scale: f64,
    pub translation: [f64; 3],
    /// Model extent after scaling.
    pub fitted_size: [f64; 3],
}
