// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, request validation) or downstream layers (listing source).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Well-formed request whose values are out of range.
    #[error("Unprocessable: {0}")]
    Validation(String),

    #[error("Listing source error: {0}")]
    Listings(#[from] ListingsError),

    #[error("Internal Server Error")]
    InternalError,
}

/// Failures loading listings. Malformed rows are not errors; they are skipped.
#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("failed to read listings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read listings: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Db(String),
}

impl From<rusqlite::Error> for ListingsError {
    fn from(e: rusqlite::Error) -> Self {
        ListingsError::Db(e.to_string())
    }
}
