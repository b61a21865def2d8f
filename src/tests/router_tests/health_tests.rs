use crate::handle;
use crate::responses::error_to_response;
use crate::tests::utils::{body_json, get, post_json, service_with_rows};

#[test]
fn healthz_reports_ok_and_version() {
    let svc = service_with_rows("");

    let resp = handle(get("/healthz"), &svc).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn unknown_path_is_not_found() {
    let svc = service_with_rows("");

    let err = handle(get("/nope"), &svc).err().expect("expected an error");
    let resp = error_to_response(err);

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["detail"], "Not Found");
}

#[test]
fn wrong_method_is_rejected() {
    let svc = service_with_rows("");

    for req in [get("/house_avg"), post_json("/healthz", "{}")] {
        let err = handle(req, &svc).err().expect("expected an error");
        assert_eq!(error_to_response(err).status(), 405);
    }
}
