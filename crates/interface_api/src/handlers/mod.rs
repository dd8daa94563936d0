//! Request handlers

pub mod customer;
pub mod fund;
pub mod health;
pub mod investment;

use std::str::FromStr;

use axum::http::HeaderMap;

use core_kernel::OperationMetadata;

use crate::error::ApiError;
use crate::AppState;

/// Parses a path identifier, accepting a bare or prefixed UUID
pub(crate) fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {} format", what)))
}

/// Builds port metadata carrying the request id and the operation deadline
pub(crate) fn operation_metadata(state: &AppState, headers: &HeaderMap) -> OperationMetadata {
    let metadata = match headers.get("x-request-id").and_then(|h| h.to_str().ok()) {
        Some(request_id) => OperationMetadata::with_correlation_id(request_id),
        None => OperationMetadata::default(),
    };
    metadata.with_timeout(state.config.operation_timeout())
}
