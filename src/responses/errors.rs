use crate::errors::ServerError;
use crate::responses::json_response;
use astra::{Body, Response};
use http::StatusCode;
use serde_json::json;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a JSON `{"detail": ...}` response.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, detail) = match &err {
        ServerError::NotFound => (404, "Not Found".to_string()),
        ServerError::MethodNotAllowed => (405, "Method Not Allowed".to_string()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::Validation(msg) => (422, msg.clone()),
        ServerError::Listings(e) => {
            tracing::error!(error = %e, "Listing source failed");
            (500, "Listings unavailable".to_string())
        }
        ServerError::InternalError => (500, "Internal Server Error".to_string()),
    };

    json_response(status, &json!({ "detail": detail })).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build error response");
        internal_error_fallback()
    })
}

/// Plain-text 500 for when even the JSON error body can't be built.
fn internal_error_fallback() -> Response {
    let mut resp = Response::new(Body::from("Internal Server Error"));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}
