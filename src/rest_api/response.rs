//! # Response Formatting
//!
//! JSON envelope shared by success and error responses.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Content type written on every API response
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// A status code plus a payload marshaled as JSON.
///
/// The payload is written bare (an entity, an array, or `null`); errors use
/// [`ErrorResponse`](super::errors::ErrorResponse) as the payload.
#[derive(Debug, Clone)]
pub struct JsonResponse<T: Serialize> {
    status: StatusCode,
    payload: T,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn new(status: StatusCode, payload: T) -> Self {
        Self { status, payload }
    }

    /// 200 OK
    pub fn ok(payload: T) -> Self {
        Self::new(StatusCode::OK, payload)
    }

    /// 201 Created
    pub fn created(payload: T) -> Self {
        Self::new(StatusCode::CREATED, payload)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }
}

impl JsonResponse<()> {
    /// 200 OK with a `null` body
    pub fn empty() -> Self {
        Self::ok(())
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        // Marshaling is best-effort
        let body = serde_json::to_vec(&self.payload).unwrap_or_default();
        (
            self.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            body,
        )
            .into_response()
    }
}
