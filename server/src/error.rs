//! Error types for the mock content API
//!
//! The server has exactly one externally visible failure: a lookup or
//! route miss. Malformed query parameters are treated as defaults or as
//! misses, never as hard errors, so there is nothing else to model.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
}

/// Uniform JSON error envelope. Clients match on the body literally, so
/// the serialized form must stay exactly `{"error":"Not found"}`.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
