//! # Pet REST API Module
//!
//! Route table, per-endpoint handlers and the JSON envelope for the pet
//! resource.

pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod routes;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use handler::ApiState;
pub use parser::ListParams;
pub use response::{JsonResponse, JSON_CONTENT_TYPE};
pub use routes::{find_route, pet_router, routes, url_for, Endpoint, Route, API_PREFIX};
