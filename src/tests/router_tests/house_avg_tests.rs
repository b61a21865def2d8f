// src/tests/router_tests/house_avg_tests.rs

use crate::analytics::ComparableSelector;
use crate::data::CsvListings;
use crate::errors::ServerError;
use crate::handle;
use crate::responses::error_to_response;
use crate::services::HouseAvgService;
use crate::tests::utils::{body_json, post_json, service_with_rows};
use std::sync::Arc;

const OLD_TOWN: &str = "\
A,3,2.0,1500,300000
A,3,2.7,1500,400000
A,2,2.0,1500,250000
A,3,2.2,1700,320000
B,3,2.0,1500,900000
";

#[test]
fn estimates_from_comparable_listings() {
    let svc = service_with_rows(OLD_TOWN);
    let req = post_json(
        "/house_avg",
        r#"{"neighborhood":" a ","bedrooms":3,"bathrooms":2.0,"sqft":1500,"bootstrap_samples":1000}"#,
    );

    let resp = handle(req, &svc).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    let estimation = &body["estimation"];
    assert_eq!(estimation["mean"], 310000.0);
    assert_eq!(estimation["unit"], "usd");
    let lower = estimation["ci95"][0].as_f64().unwrap();
    let upper = estimation["ci95"][1].as_f64().unwrap();
    assert!(300000.0 <= lower && lower <= upper && upper <= 320000.0);

    let cohort = &body["cohort"];
    assert_eq!(cohort["count"], 2);
    assert_eq!(cohort["neighborhood"], " a ");
    assert_eq!(cohort["price_examples"], serde_json::json!([300000.0, 320000.0]));
}

#[test]
fn single_comparable_gives_degenerate_interval() {
    let svc = service_with_rows("C,4,3.0,2400,350000\n");
    let req = post_json(
        "/house_avg",
        r#"{"neighborhood":"C","bedrooms":4,"bathrooms":3.0,"sqft":2400,"bootstrap_samples":100}"#,
    );

    let body = body_json(handle(req, &svc).unwrap());

    assert_eq!(body["estimation"]["mean"], 350000.0);
    assert_eq!(body["estimation"]["ci95"], serde_json::json!([350000.0, 350000.0]));
}

#[test]
fn no_comparables_is_not_found_with_code() {
    let svc = service_with_rows(OLD_TOWN);
    let req = post_json(
        "/house_avg",
        r#"{"neighborhood":"Unknown","bedrooms":3,"bathrooms":2.0,"sqft":1500}"#,
    );

    let resp = handle(req, &svc).unwrap();
    assert_eq!(resp.status(), 404);

    let body = body_json(resp);
    assert_eq!(body["detail"]["code"], "NoData");
    assert_eq!(
        body["detail"]["message"],
        "No comparable listings matched the supplied specification."
    );
}

#[test]
fn empty_listings_file_is_no_data() {
    let svc = service_with_rows("");
    let req = post_json(
        "/house_avg",
        r#"{"neighborhood":"A","bedrooms":3,"bathrooms":2.0,"sqft":1500}"#,
    );

    assert_eq!(handle(req, &svc).unwrap().status(), 404);
}

#[test]
fn out_of_range_fields_are_unprocessable() {
    let svc = service_with_rows(OLD_TOWN);
    let bodies = [
        r#"{"neighborhood":"A","bedrooms":11,"bathrooms":2.0,"sqft":1500}"#,
        r#"{"neighborhood":"A","bedrooms":3,"bathrooms":10.5,"sqft":1500}"#,
        r#"{"neighborhood":"A","bedrooms":3,"bathrooms":2.0,"sqft":99}"#,
        r#"{"neighborhood":"A","bedrooms":3,"bathrooms":2.0,"sqft":1500,"bootstrap_samples":99}"#,
        r#"{"neighborhood":"A","bedrooms":3,"bathrooms":2.0,"sqft":1500,"bootstrap_samples":10001}"#,
        r#"{"neighborhood":"A","bedrooms":-1,"bathrooms":2.0,"sqft":1500}"#,
        r#"{"neighborhood":"A","bathrooms":2.0,"sqft":1500}"#,
    ];

    for body in bodies {
        let err = handle(post_json("/house_avg", body), &svc)
            .err()
            .expect("expected a validation error");
        assert!(
            matches!(err, ServerError::Validation(_)),
            "unexpected error for {body}: {err}"
        );
        assert_eq!(error_to_response(err).status(), 422);
    }
}

#[test]
fn broken_json_is_bad_request() {
    let svc = service_with_rows(OLD_TOWN);

    let err = handle(post_json("/house_avg", r#"{"neighborhood":"#), &svc)
        .err()
        .expect("expected an error");

    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn unreadable_listings_are_a_server_error() {
    let svc = HouseAvgService::new(
        Arc::new(CsvListings::new("/no/such/dir/listings.csv")),
        ComparableSelector::default(),
    );
    let req = post_json(
        "/house_avg",
        r#"{"neighborhood":"A","bedrooms":3,"bathrooms":2.0,"sqft":1500}"#,
    );

    let err = handle(req, &svc).err().expect("expected an error");
    assert!(matches!(err, ServerError::Listings(_)));

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp)["detail"], "Listings unavailable");
}
