pub mod config;
pub mod material;
pub mod stats;

pub use config::*;
pub use material::*;
pub use stats::*;
