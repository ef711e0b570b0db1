//! HTTP Server Configuration
//!
//! Listen address, transport timeouts and the shutdown grace period.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP server configuration (`http-server` section of the config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpServerConfig {
    /// Address to bind to (default: "0.0.0.0:8080")
    #[serde(default = "default_address")]
    pub address: String,

    /// Seconds allowed to receive a request body (default: 5)
    #[serde(default = "default_read_timeout")]
    pub read_timeout: u64,

    /// Seconds allowed to produce a response (default: 10)
    #[serde(default = "default_write_timeout")]
    pub write_timeout: u64,

    /// Seconds in-flight requests get to finish after shutdown starts (default: 5)
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace: u64,
}

fn default_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_read_timeout() -> u64 {
    5
}

fn default_write_timeout() -> u64 {
    10
}

fn default_shutdown_grace() -> u64 {
    5
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            read_timeout: default_read_timeout(),
            write_timeout: default_write_timeout(),
            shutdown_grace: default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config bound to the given address
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> &str {
        &self.address
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace)
    }

    /// Check the address parses and the timeouts are non-zero
    pub fn validate(&self) -> Result<(), String> {
        self.address
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid address '{}': {}", self.address, e))?;

        if self.read_timeout == 0 {
            return Err("read-timeout must be > 0".to_string());
        }
        if self.write_timeout == 0 {
            return Err("write-timeout must be > 0".to_string());
        }
        Ok(())
    }
}
