//! # REST API Errors
//!
//! Error types for the pet endpoints and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

use super::response::JsonResponse;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Pet API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path parameter is not an integer
    #[error("Invalid request")]
    InvalidRequest,

    /// Body is not a JSON pet
    #[error("Invalid request payload")]
    InvalidPayload,

    /// Zero rows returned or affected
    #[error("Pet not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure, message passed through verbatim
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::InvalidPayload => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Store(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Store(message) = &self {
            tracing::error!(error = %message, "store operation failed");
        }
        JsonResponse::new(status, ErrorResponse::from(&self)).into_response()
    }
}
