//! Unified error handling for the todo API.
//!
//! Every failure, whether the store or the request body, collapses into a 500
//! carrying the failure message, so handlers can use `?` throughout.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_shared::ErrorResponse;

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store/database failure
    #[error("{0:#}")]
    Store(#[from] anyhow::Error),

    /// Request body missing, not JSON, or the wrong shape
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!("Store error: {:?}", e),
            ApiError::Body(e) => tracing::warn!("Request body rejected: {}", e),
        }

        let body = Json(ErrorResponse::new(self.to_string()));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
