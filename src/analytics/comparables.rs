// src/analytics/comparables.rs
use crate::domain::{ComparisonSpec, Listing};

pub const DEFAULT_BATHROOM_TOLERANCE: f64 = 0.5;
pub const DEFAULT_AREA_TOLERANCE: u32 = 250;

/// Picks the listings that are close enough to a target spec to price it.
/// Tolerances are fixed for the lifetime of the selector.
#[derive(Debug, Clone, Copy)]
pub struct ComparableSelector {
    bathroom_tolerance: f64,
    area_tolerance: u32,
}

impl Default for ComparableSelector {
    fn default() -> Self {
        Self::new(DEFAULT_BATHROOM_TOLERANCE, DEFAULT_AREA_TOLERANCE)
    }
}

impl ComparableSelector {
    pub fn new(bathroom_tolerance: f64, area_tolerance: u32) -> Self {
        Self {
            bathroom_tolerance,
            area_tolerance,
        }
    }

    pub fn bathroom_tolerance(&self) -> f64 {
        self.bathroom_tolerance
    }

    pub fn area_tolerance(&self) -> u32 {
        self.area_tolerance
    }

    /// Bedrooms must match exactly; bathrooms and area within tolerance (inclusive).
    pub fn is_comparable(&self, listing: &Listing, spec: &ComparisonSpec) -> bool {
        listing.bedrooms == spec.bedrooms
            && (listing.bathrooms - spec.bathrooms).abs() <= self.bathroom_tolerance
            && listing.sqft.abs_diff(spec.sqft) <= self.area_tolerance
    }

    /// Stable filter: comparables come back in input order.
    pub fn select_comparables<'a, I>(&self, listings: I, spec: &ComparisonSpec) -> Vec<Listing>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        listings
            .into_iter()
            .filter(|listing| self.is_comparable(listing, spec))
            .cloned()
            .collect()
    }
}
