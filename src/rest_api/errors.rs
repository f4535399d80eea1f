//! REST API error mapping.
//!
//! Translates the core error taxonomy to HTTP statuses: unknown feed or
//! user is 404, an out-of-range page cursor is 400, storage and codec
//! failures are 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::ledger::LedgerError;
use crate::store::StoreError;

/// Result type for REST handlers
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    /// Feed or paging failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// User or subscription failure
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Storage failure outside the catalog/ledger paths
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RestError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Catalog(e) => catalog_status(e),
            RestError::Ledger(LedgerError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            RestError::Ledger(LedgerError::Catalog(e)) => catalog_status(e),
            RestError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn catalog_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::FeedNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::StartIdOutOfRange { .. } => StatusCode::BAD_REQUEST,
        CatalogError::Store(_) | CatalogError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
