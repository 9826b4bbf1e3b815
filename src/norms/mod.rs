// Norms module - the offline calibration path

pub mod builder;
pub mod stats;

pub use builder::{build_norms, build_norms_with_config};
pub use stats::{distribution, mean, population_std_dev};
