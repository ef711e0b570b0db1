//! Observability for the pet API
//!
//! Logging goes through `tracing`; this module only installs the subscriber.
//! Request-level events come from the route logger in
//! [`rest_api::routes`](crate::rest_api::routes) and tower-http's trace layer.

mod logger;

pub use logger::{init_logging, LogFormat, DEFAULT_FILTER};
