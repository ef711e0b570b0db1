//! CLI command implementations
//!
//! `serve` boots in a fixed order: logging, configuration, store, listener.
//! A failure at any step is fatal; the API never serves with a broken store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::{ctrl_c, HttpServer, HttpServerConfig};
use crate::observability::{init_logging, LogFormat};
use crate::rest_api::routes;
use crate::store::{SqlitePetStore, StoreConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub http_server: HttpServerConfig,

    /// Store settings
    #[serde(default)]
    pub db_server: StoreConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.http_server
            .validate()
            .map_err(|e| CliError::config_error(format!("http-server: {}", e)))?;

        if self.db_server.path.trim().is_empty() {
            return Err(CliError::config_error("db-server: path must not be empty"));
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            reset_schema,
            json_logs,
        } => serve(&config, reset_schema, json_logs),
        Command::Routes => print_routes(),
    }
}

/// Serve the pet API until Ctrl-C
pub fn serve(config_path: &Path, reset_schema: bool, json_logs: bool) -> CliResult<()> {
    init_logging(LogFormat::from_json_flag(json_logs));

    let mut config = Config::load(config_path)?;
    if reset_schema {
        config.db_server.reset_schema = true;
    }

    let store = SqlitePetStore::open(&config.db_server)
        .map_err(|e| CliError::boot_failed(format!("Failed to open store: {}", e)))?;

    let server = HttpServer::new(config.http_server, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let listener = server.bind().await.map_err(|e| {
            CliError::boot_failed(format!("Failed to bind {}: {}", server.socket_addr(), e))
        })?;
        server
            .serve_until(listener, ctrl_c())
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Print the route table as JSON
pub fn print_routes() -> CliResult<()> {
    let table: Vec<_> = routes()
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "method": r.method.as_str(),
                "pattern": r.pattern,
            })
        })
        .collect();

    write_response(json!(table))
}
