//! CLI module for petstore
//!
//! Provides command-line interface for:
//! - serve: Open the store and serve the HTTP API
//! - routes: Print the route table

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{print_routes, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
