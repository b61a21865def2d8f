pub mod csv_listings;

use crate::domain::Listing;
use crate::errors::ListingsError;
use std::sync::Arc;

pub use csv_listings::CsvListings;

/// Where the service gets its listings from.
///
/// Implementations hand back fully materialized data; the pricing core
/// never fetches or caches on its own.
pub trait ListingSource: Send + Sync {
    fn all(&self) -> Result<Arc<Vec<Listing>>, ListingsError>;

    /// Listings in `name`, compared trimmed and case-insensitively, in source order.
    fn by_neighborhood(&self, name: &str) -> Result<Vec<Listing>, ListingsError> {
        let all = self.all()?;
        Ok(all
            .iter()
            .filter(|listing| listing.in_neighborhood(name))
            .cloned()
            .collect())
    }
}
