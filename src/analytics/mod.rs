pub mod bootstrap;
pub mod comparables;

pub use bootstrap::{mean_ci95, mean_ci95_with_rng, Estimate, DEFAULT_BOOTSTRAP_SAMPLES};
pub use comparables::ComparableSelector;
