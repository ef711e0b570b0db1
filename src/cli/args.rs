//! CLI argument definitions using clap
//!
//! Commands:
//! - petstore serve --config <path> [--reset-schema] [--json-logs]
//! - petstore routes

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// petstore - CRUD HTTP API over a single pet table
#[derive(Parser, Debug)]
#[command(name = "petstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the store and serve the pet API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./petstore.json")]
        config: PathBuf,

        /// Drop and recreate the pets table before serving (destroys all pets)
        #[arg(long)]
        reset_schema: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Print the route table and exit
    Routes,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
