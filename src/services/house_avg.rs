// src/services/house_avg.rs
use crate::analytics::{mean_ci95, mean_ci95_with_rng, ComparableSelector, Estimate};
use crate::data::ListingSource;
use crate::domain::ComparisonSpec;
use crate::errors::ListingsError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

pub const NO_DATA_CODE: &str = "NoData";
pub const NO_DATA_MESSAGE: &str = "No comparable listings matched the supplied specification.";
const EXPLANATION: &str = "Bootstrap 95% CI using listings in the same neighborhood with comparable \
bedrooms, bathrooms, and square footage.";
const PRICE_EXAMPLES: usize = 5;

/// What the caller wants priced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimateQuery {
    pub neighborhood: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u32,
    #[serde(default = "default_bootstrap_samples")]
    pub bootstrap_samples: usize,
}

fn default_bootstrap_samples() -> usize {
    crate::analytics::DEFAULT_BOOTSTRAP_SAMPLES
}

impl EstimateQuery {
    pub fn spec(&self) -> ComparisonSpec {
        ComparisonSpec {
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            sqft: self.sqft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cohort {
    pub count: usize,
    pub neighborhood: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_examples: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    pub mean: f64,
    pub ci95: [f64; 2],
    pub unit: &'static str,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoDataError {
    pub code: &'static str,
    pub message: &'static str,
}

/// Either a priced cohort or an empty one. No data is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HouseAvgOutcome {
    NoData { error: NoDataError, cohort: Cohort },
    Estimated { estimation: Estimation, cohort: Cohort },
}

/// Coordinates the listing source and the pricing core.
pub struct HouseAvgService {
    source: Arc<dyn ListingSource>,
    selector: ComparableSelector,
}

impl HouseAvgService {
    pub fn new(source: Arc<dyn ListingSource>, selector: ComparableSelector) -> Self {
        Self { source, selector }
    }

    pub fn estimate(&self, query: &EstimateQuery) -> Result<HouseAvgOutcome, ListingsError> {
        self.run(query, mean_ci95)
    }

    /// Same as `estimate`, resampling with the supplied generator.
    pub fn estimate_with_rng<R: Rng>(
        &self,
        query: &EstimateQuery,
        rng: &mut R,
    ) -> Result<HouseAvgOutcome, ListingsError> {
        self.run(query, |prices, samples| mean_ci95_with_rng(prices, samples, rng))
    }

    #[instrument(skip(self, query, bootstrap), fields(neighborhood = %query.neighborhood))]
    fn run<F>(&self, query: &EstimateQuery, bootstrap: F) -> Result<HouseAvgOutcome, ListingsError>
    where
        F: FnOnce(&[f64], usize) -> Estimate,
    {
        let listings = self.source.by_neighborhood(&query.neighborhood)?;
        let comparables = self.selector.select_comparables(&listings, &query.spec());
        let prices: Vec<f64> = comparables.iter().map(|listing| listing.price).collect();

        tracing::debug!(
            in_neighborhood = listings.len(),
            comparables = prices.len(),
            "Selected comparables"
        );

        let mut cohort = Cohort {
            count: prices.len(),
            neighborhood: query.neighborhood.clone(),
            bedrooms: query.bedrooms,
            bathrooms: query.bathrooms,
            sqft: query.sqft,
            price_examples: None,
        };

        if prices.is_empty() {
            tracing::info!("No comparable listings");
            return Ok(HouseAvgOutcome::NoData {
                error: NoDataError {
                    code: NO_DATA_CODE,
                    message: NO_DATA_MESSAGE,
                },
                cohort,
            });
        }

        let est = bootstrap(&prices, query.bootstrap_samples);
        tracing::info!(
            count = prices.len(),
            mean = est.mean,
            lower = est.lower,
            upper = est.upper,
            "Estimated price"
        );

        cohort.price_examples = Some(prices.iter().take(PRICE_EXAMPLES).copied().collect());
        Ok(HouseAvgOutcome::Estimated {
            estimation: Estimation {
                mean: est.mean.round_ties_even(),
                ci95: [est.lower.round_ties_even(), est.upper.round_ties_even()],
                unit: "usd",
                explanation: EXPLANATION,
            },
            cohort,
        })
    }
}
