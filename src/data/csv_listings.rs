// src/data/csv_listings.rs
use crate::data::ListingSource;
use crate::domain::Listing;
use crate::errors::ListingsError;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

// Expected header:
// neighborhood,bedrooms,bathrooms,sqft,price[,year_built,renovated,lat,lon]
#[derive(Debug, Deserialize)]
struct ListingRow {
    neighborhood: String,
    bedrooms: u32,
    bathrooms: f64,
    sqft: u32,
    price: f64,

    // Metadata is best-effort: garbage here must not drop the row.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    year_built: Option<i32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    renovated: Option<bool>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lon: Option<f64>,
}

impl ListingRow {
    // f64 parsing accepts "NaN" and "inf", which would poison every mean they touch.
    fn has_usable_numbers(&self) -> bool {
        self.price.is_finite()
            && self.price > 0.0
            && self.bathrooms.is_finite()
            && self.bathrooms >= 0.0
    }
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            year_built: row.year_built,
            renovated: row.renovated,
            lat: row.lat,
            lon: row.lon,
            ..Listing::new(
                row.neighborhood.trim(),
                row.bedrooms,
                row.bathrooms,
                row.sqft,
                row.price,
            )
        }
    }
}

/// Listings read from a delimited file, loaded once and kept for the life of the value.
pub struct CsvListings {
    path: PathBuf,
    snapshot: OnceLock<Arc<Vec<Listing>>>,
}

impl CsvListings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for CsvListings {
    fn all(&self) -> Result<Arc<Vec<Listing>>, ListingsError> {
        if let Some(listings) = self.snapshot.get() {
            return Ok(Arc::clone(listings));
        }

        // A failed load is not cached, so the next request retries.
        let file = File::open(&self.path).map_err(|source| ListingsError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let loaded = Arc::new(parse_listings(file)?);
        tracing::info!(
            path = %self.path.display(),
            count = loaded.len(),
            "Loaded listings snapshot"
        );

        // Concurrent first loads: whichever lands first wins.
        Ok(Arc::clone(self.snapshot.get_or_init(|| loaded)))
    }
}

/// Parse listings from CSV text with a header row.
/// Rows that don't parse are skipped; only I/O failures are errors.
pub fn parse_listings<R: Read>(reader: R) -> Result<Vec<Listing>, ListingsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut listings = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in rdr.deserialize::<ListingRow>().enumerate() {
        match row {
            Ok(row) if !row.has_usable_numbers() => {
                skipped += 1;
                tracing::debug!(
                    row = idx + 1,
                    price = row.price,
                    bathrooms = row.bathrooms,
                    "Skipping listing row with unusable numbers"
                );
            }
            Ok(row) => listings.push(Listing::from(row)),
            Err(e) if e.is_io_error() => return Err(ListingsError::Csv(e)),
            Err(e) => {
                skipped += 1;
                tracing::debug!(row = idx + 1, error = %e, "Skipping malformed listing row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, kept = listings.len(), "Some listing rows were malformed");
    }
    Ok(listings)
}
