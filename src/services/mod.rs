pub mod house_avg;

pub use house_avg::{EstimateQuery, HouseAvgOutcome, HouseAvgService};
