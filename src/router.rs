use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};
use crate::services::{EstimateQuery, HouseAvgOutcome, HouseAvgService};
use astra::Request;
use serde_json::{error::Category, json};
use std::io::Read;

const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, service: &HouseAvgService) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/healthz") => healthz(),
        ("POST", "/house_avg") => house_avg(&mut req, service),

        (_, "/healthz") | (_, "/house_avg") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

fn healthz() -> ResultResp {
    json_response(
        200,
        &json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }),
    )
}

fn house_avg(req: &mut Request, service: &HouseAvgService) -> ResultResp {
    let query = parse_query(req)?;
    validate(&query)?;

    match service.estimate(&query)? {
        HouseAvgOutcome::NoData { error, .. } => json_response(404, &json!({ "detail": error })),
        estimated => json_response(200, &estimated),
    }
}

fn parse_query(req: &mut Request) -> Result<EstimateQuery, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;

    // Wrong types or missing fields are a validation failure, broken JSON is not.
    serde_json::from_slice(&body).map_err(|e| match e.classify() {
        Category::Data => ServerError::Validation(e.to_string()),
        _ => ServerError::BadRequest(format!("invalid JSON: {e}")),
    })
}

fn validate(query: &EstimateQuery) -> Result<(), ServerError> {
    if query.bedrooms > 10 {
        return Err(ServerError::Validation("bedrooms must be between 0 and 10".into()));
    }
    if !(0.0..=10.0).contains(&query.bathrooms) {
        return Err(ServerError::Validation("bathrooms must be between 0 and 10".into()));
    }
    if !(100..=20_000).contains(&query.sqft) {
        return Err(ServerError::Validation("sqft must be between 100 and 20000".into()));
    }
    if !(100..=10_000).contains(&query.bootstrap_samples) {
        return Err(ServerError::Validation(
            "bootstrap_samples must be between 100 and 10000".into(),
        ));
    }
    Ok(())
}
