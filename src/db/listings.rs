use crate::data::ListingSource;
use crate::db::connection::Database;
use crate::domain::listing::{normalize_neighborhood, Listing};
use crate::errors::ListingsError;
use rusqlite::types::ValueRef;
use rusqlite::{params, Row};
use std::sync::Arc;

const SELECT_LISTINGS: &str = r#"
    SELECT
        neighborhood,   -- 0
        bedrooms,       -- 1
        bathrooms,      -- 2
        sqft,           -- 3
        price,          -- 4
        year_built,     -- 5
        renovated,      -- 6
        lat,            -- 7
        lon             -- 8
    FROM listings
"#;

/// Insert listings in one transaction. Returns how many rows were written.
pub fn save_listings(db: &Database, listings: &[Listing]) -> Result<usize, ListingsError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO listings (
                    neighborhood, neighborhood_key,
                    bedrooms, bathrooms, sqft, price,
                    year_built, renovated, lat, lon
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )?;

            for listing in listings {
                stmt.execute(params![
                    listing.neighborhood.trim(),
                    normalize_neighborhood(&listing.neighborhood),
                    listing.bedrooms,
                    listing.bathrooms,
                    listing.sqft,
                    listing.price,
                    listing.year_built,
                    listing.renovated,
                    listing.lat,
                    listing.lon,
                ])?;
            }
        }
        tx.commit()?;
        Ok(listings.len())
    })
}

pub fn count_listings(db: &Database) -> Result<usize, ListingsError> {
    db.with_conn(|conn| {
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))?;
        Ok(n as usize)
    })
}

/// Listing source backed by the `listings` table.
pub struct SqliteListings {
    db: Database,
}

impl SqliteListings {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn query(&self, neighborhood_key: Option<&str>) -> Result<Vec<Listing>, ListingsError> {
        self.db.with_conn(|conn| {
            let sql = match neighborhood_key {
                Some(_) => format!("{SELECT_LISTINGS} WHERE neighborhood_key = ?1 ORDER BY id"),
                None => format!("{SELECT_LISTINGS} ORDER BY id"),
            };
            let mut stmt = conn.prepare(&sql)?;

            let rows = match neighborhood_key {
                Some(key) => stmt.query_map(params![key], row_to_listing)?,
                None => stmt.query_map([], row_to_listing)?,
            };

            let mut out = Vec::new();
            for row in rows {
                // NULL, negative or mistyped core fields count as malformed; skip them.
                if let Some(listing) = row? {
                    out.push(listing);
                }
            }
            Ok(out)
        })
    }
}

impl ListingSource for SqliteListings {
    fn all(&self) -> Result<Arc<Vec<Listing>>, ListingsError> {
        Ok(Arc::new(self.query(None)?))
    }

    fn by_neighborhood(&self, name: &str) -> Result<Vec<Listing>, ListingsError> {
        self.query(Some(&normalize_neighborhood(name)))
    }
}

fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<Option<Listing>> {
    let bedrooms = integer_cell(row.get_ref(1)?).and_then(|n| u32::try_from(n).ok());
    let bathrooms = real_cell(row.get_ref(2)?).filter(|b| b.is_finite() && *b >= 0.0);
    let sqft = integer_cell(row.get_ref(3)?).and_then(|n| u32::try_from(n).ok());
    let price = real_cell(row.get_ref(4)?).filter(|p| p.is_finite() && *p > 0.0);

    let (Some(bedrooms), Some(bathrooms), Some(sqft), Some(price)) =
        (bedrooms, bathrooms, sqft, price)
    else {
        return Ok(None);
    };

    Ok(Some(Listing {
        neighborhood: row.get(0)?,
        bedrooms,
        bathrooms,
        sqft,
        price,
        // Metadata is best-effort, same as the CSV source.
        year_built: row.get(5).ok().flatten(),
        renovated: row.get(6).ok().flatten(),
        lat: row.get(7).ok().flatten(),
        lon: row.get(8).ok().flatten(),
    }))
}

fn integer_cell(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(n) => Some(n),
        _ => None,
    }
}

fn real_cell(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Integer(n) => Some(n as f64),
        ValueRef::Real(f) => Some(f),
        _ => None,
    }
}
