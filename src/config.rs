use anyhow::{bail, Context};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::analytics::comparables::{DEFAULT_AREA_TOLERANCE, DEFAULT_BATHROOM_TOLERANCE};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub listings_csv: PathBuf,
    /// When set, listings are read from this SQLite file instead of the CSV.
    pub listings_db: Option<String>,
    pub bathroom_tolerance: f64,
    pub area_tolerance: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cfg = Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.into())?,
            max_workers: parse_or(&lookup, "MAX_WORKERS", 8)?,
            listings_csv: lookup("LISTINGS_CSV")
                .unwrap_or_else(|| "data/listings.csv".to_string())
                .into(),
            listings_db: lookup("LISTINGS_DB").filter(|s| !s.trim().is_empty()),
            bathroom_tolerance: parse_or(&lookup, "TOL_BATHS", DEFAULT_BATHROOM_TOLERANCE)?,
            area_tolerance: parse_or(&lookup, "TOL_SQFT", DEFAULT_AREA_TOLERANCE)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.max_workers == 0 {
            bail!("MAX_WORKERS must be at least 1");
        }
        // A NaN tolerance would match nothing; a negative one is meaningless.
        if !self.bathroom_tolerance.is_finite() || self.bathroom_tolerance < 0.0 {
            bail!(
                "TOL_BATHS must be a non-negative number, got {}",
                self.bathroom_tolerance
            );
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
