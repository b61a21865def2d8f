use crate::analytics::ComparableSelector;
use crate::data::CsvListings;
use crate::services::HouseAvgService;
use astra::{Body, Request, Response};
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub const HEADER: &str = "neighborhood,bedrooms,bathrooms,sqft,price\n";

static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Write `rows` (without header) to a fresh temp CSV and return its path.
pub fn write_listings_csv(rows: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "router_test_{}_{}.csv",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::write(&path, format!("{HEADER}{rows}")).unwrap();
    path
}

/// Service over a CSV fixture with default tolerances.
pub fn service_with_rows(rows: &str) -> HouseAvgService {
    let path = write_listings_csv(rows);
    HouseAvgService::new(
        Arc::new(CsvListings::new(path)),
        ComparableSelector::default(),
    )
}

pub fn post_json(path: &str, body: &str) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn body_json(mut resp: Response) -> serde_json::Value {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
