//! Store Configuration
//!
//! Location of the SQLite database and schema bootstrap options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Path that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Store configuration (`db-server` section of the config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Database file path, or `:memory:` (default: "./petstore.db")
    #[serde(default = "default_path")]
    pub path: String,

    /// Seconds to wait on a locked database before failing (default: 5)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Drop and recreate the pets table on open. Destroys all stored pets.
    #[serde(default)]
    pub reset_schema: bool,
}

fn default_path() -> String {
    "./petstore.db".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            connect_timeout: default_connect_timeout(),
            reset_schema: false,
        }
    }
}

impl StoreConfig {
    /// In-memory store, used by tests and throwaway runs
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_string(),
            ..Default::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}
