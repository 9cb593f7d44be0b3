use serde::{Deserialize, Serialize};

use mesh_analysis::AnalysisError;
use print_types::{ModelStatistics, PriceEstimate, UnknownMaterial};

/// Statistics and price for one mesh + configuration pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub statistics: ModelStatistics,
    pub estimate: PriceEstimate,
}

/// Errors from price estimation.
///
/// All of these are caller contract violations; none are retryable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("mesh has no vertices")]
    EmptyMesh,

    #[error("unknown material: {name}")]
    UnknownMaterial { name: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("mesh volume is not finite: {volume}")]
    NonFiniteVolume { volume: f64 },

    #[error("{quantity} out of range: {value}")]
    OutOfRange { quantity: &'static str, value: f64 },
}

impl From<AnalysisError> for EstimateError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyMesh => EstimateError::EmptyMesh,
        }
    }
}

impl From<UnknownMaterial> for EstimateError {
    fn from(err: UnknownMaterial) -> Self {
        EstimateError::UnknownMaterial { name: err.name }
    }
}

impl EstimateError {
    pub(crate) fn out_of_range(quantity: &'static str, value: f64) -> Self {
        EstimateError::OutOfRange { quantity, value }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        EstimateError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
