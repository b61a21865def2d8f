pub mod listing;

pub use listing::{ComparisonSpec, Listing};
