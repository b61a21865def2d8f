/// A single housing listing as handed to the pricing core.
///
/// Only `bedrooms`, `bathrooms`, `sqft` and `price` take part in the estimate;
/// `neighborhood` is matched upstream by the listing source.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub neighborhood: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u32,
    pub price: f64,

    // Carried through from the source, unused by the estimate.
    pub year_built: Option<i32>,
    pub renovated: Option<bool>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Listing {
    pub fn new(
        neighborhood: impl Into<String>,
        bedrooms: u32,
        bathrooms: f64,
        sqft: u32,
        price: f64,
    ) -> Self {
        Self {
            neighborhood: neighborhood.into(),
            bedrooms,
            bathrooms,
            sqft,
            price,
            year_built: None,
            renovated: None,
            lat: None,
            lon: None,
        }
    }

    /// True when this listing belongs to `name`, ignoring case and surrounding whitespace.
    pub fn in_neighborhood(&self, name: &str) -> bool {
        normalize_neighborhood(&self.neighborhood) == normalize_neighborhood(name)
    }
}

/// The target a comparable search is run against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSpec {
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u32,
}

pub fn normalize_neighborhood(name: &str) -> String {
    name.trim().to_lowercase()
}
