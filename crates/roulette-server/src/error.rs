//! Error types for the HTTP handlers.
//!
//! Every failure maps to a specific status code: bad client input is
//! 4xx, storage and empty-list failures are 5xx. Nothing here is fatal
//! to the process; each request fails independently with a descriptive
//! message and no retry.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roulette_core::{SelectorError, StoreError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request body violates a list invariant (empty list, blank
    /// label, or weight < 1). Nothing was written.
    #[error("invalid items list: {0}")]
    Validation(#[from] ValidationError),

    /// The request body could not be parsed as an items array (not
    /// JSON, not an array, or a weight outside the valid range).
    #[error("invalid request body: {0}")]
    InvalidPayload(String),

    /// The backing store failed. Any open transaction was rolled back,
    /// so no partial state was persisted.
    #[error("storage error: {0}")]
    Storage(#[source] StoreError),

    /// A selection was requested while the stored list is empty.
    #[error("no items available for selection")]
    EmptyList,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Validation failures inside the store are still client errors;
        // only genuine database failures are 5xx.
        match err {
            StoreError::Validation(v) => Self::Validation(v),
            other => Self::Storage(other),
        }
    }
}

impl From<SelectorError> for ApiError {
    fn from(err: SelectorError) -> Self {
        match err {
            SelectorError::EmptyList => Self::EmptyList,
        }
    }
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    ///
    /// - Validation / `InvalidPayload`: 400 Bad Request
    /// - Storage: 500 Internal Server Error
    /// - `EmptyList`: 500 Internal Server Error (the list is server
    ///   state, not client input)
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::EmptyList => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
