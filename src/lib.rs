//! petstore - a small CRUD HTTP API over a single pet table
//!
//! Layers, leaves first:
//! - [`store`]: parameterized SQL over the `pets` table
//! - [`rest_api`]: route table, handlers and the JSON envelope
//! - [`http_server`]: timeouts, tracing and the shutdown drain
//! - [`cli`]: configuration and process entry

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod pet;
pub mod rest_api;
pub mod store;
