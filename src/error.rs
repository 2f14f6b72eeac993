//! Error types for the inventory service
//!
//! Provides unified error handling using thiserror. Every failure maps to a
//! stable category so callers can branch on cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures reported by a record store adapter.
///
/// "Not found" is never an error here: lookups return `Option` and deletes
/// return the number of affected rows.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database rejected or failed the statement
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// A stored row could not be mapped back to an item
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

// == Api Error Enum ==
/// Unified error type for the item service and its HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed limit, sort, filter, cursor or body
    #[error("{0}")]
    Validation(String),

    /// Identifier has no live row
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Admission denied by the rate limiter
    #[error("Too many requests from {0}, please try again later")]
    RateLimited(String),

    /// Underlying persistence failure, with the operation that hit it
    #[error("failed to {op}: {source}")]
    Store {
        op: &'static str,
        #[source]
        source: StoreError,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wraps a store failure with the operation it interrupted.
    pub fn store(op: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { op, source }
    }

    /// Stable, machine-readable category of this error.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::RateLimited(_) => "rate_limited",
            ApiError::Store { .. } => "store_error",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Store { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse::new(
            self.category(),
            self.to_string(),
            status.as_u16(),
        ));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the item service.
pub type Result<T> = std::result::Result<T, ApiError>;
