//! # Pet API HTTP Server Module
//!
//! Serves the pet routes under `/v2` with transport timeouts and a bounded
//! shutdown drain.

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{ctrl_c, HttpServer, PetService};
