use crate::analytics::ComparableSelector;
use crate::config::Config;
use crate::data::{CsvListings, ListingSource};
use crate::db::{count_listings, init_db, save_listings, Database, SqliteListings};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::services::HouseAvgService;
use anyhow::Context;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod analytics;
mod config;
mod data;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod services;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,neighborhood_pricing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env().context("Failed to load configuration")?;

    // 1️⃣ Pick the listing source
    let source: Arc<dyn ListingSource> = match &cfg.listings_db {
        Some(path) => {
            let db = Database::new(path.clone());
            init_db(&db).context("Database initialization failed")?;
            seed_from_csv(&db, &cfg)?;
            tracing::info!(path = %path, "Using SQLite listings");
            Arc::new(SqliteListings::new(db))
        }
        None => {
            let csv = CsvListings::new(cfg.listings_csv.clone());
            tracing::info!(path = %csv.path().display(), "Using CSV listings");
            Arc::new(csv)
        }
    };

    // 2️⃣ Wire the estimator
    let selector = ComparableSelector::new(cfg.bathroom_tolerance, cfg.area_tolerance);
    tracing::info!(
        tol_baths = selector.bathroom_tolerance(),
        tol_sqft = selector.area_tolerance(),
        "Comparable tolerances"
    );
    let service = HouseAvgService::new(source, selector);

    // 3️⃣ Start the server
    tracing::info!(addr = %cfg.bind_addr, workers = cfg.max_workers, "Starting server");
    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);

    server
        .serve(move |req: astra::Request, _info| {
            let method = req.method().clone();
            let path = req.uri().path().to_string();

            let resp = match handle(req, &service) {
                Ok(resp) => resp,
                Err(err) => {
                    tracing::warn!(%method, %path, error = %err, "Request failed");
                    error_to_response(err)
                }
            };
            tracing::info!(%method, %path, status = resp.status().as_u16(), "Handled request");
            resp
        })
        .context("Server ended with error")?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}

/// Fill an empty listings table from the CSV file, if there is one.
fn seed_from_csv(db: &Database, cfg: &Config) -> anyhow::Result<()> {
    if count_listings(db)? > 0 || !cfg.listings_csv.exists() {
        return Ok(());
    }

    let listings = CsvListings::new(cfg.listings_csv.clone()).all()?;
    let written = save_listings(db, &listings)?;
    tracing::info!(
        rows = written,
        from = %cfg.listings_csv.display(),
        "Seeded empty listings table"
    );
    Ok(())
}
