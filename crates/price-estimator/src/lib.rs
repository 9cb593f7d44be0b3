//! Weight, print-time and cost estimation for FDM prints.
//!
//! Every operation is a pure function of its inputs. The [`estimate`]
//! pipeline re-runs in full on each call; callers hold the current snapshot.

pub mod config;
pub mod ops;
pub mod pipeline;
pub mod types;

pub use config::{validate_print_config, MaterialSpec, PricingConfig};
pub use ops::{estimate_cost, estimate_print_time, estimate_weight, infill_multiplier};
pub use pipeline::{estimate, estimate_from_volume, PriceEstimator};
pub use types::{EstimateError, Quote};
