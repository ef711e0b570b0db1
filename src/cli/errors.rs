//! CLI errors
//!
//! Every CLI error is fatal. `main` prints it as `<CODE>: <message>` and
//! exits with status 1.

use std::io;

use thiserror::Error;

/// Stable code printed in front of every CLI failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Config file missing, unreadable or invalid
    ConfigError,
    /// Writing to stdout failed
    IoError,
    /// Store, runtime or listener could not be brought up
    BootFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PETSTORE_CLI_CONFIG_ERROR",
            Self::IoError => "PETSTORE_CLI_IO_ERROR",
            Self::BootFailed => "PETSTORE_CLI_BOOT_FAILED",
        }
    }
}

#[derive(Debug, Error)]
#[error("{}: {}", .code.code(), .message)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    fn with_code(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::with_code(CliErrorCode::ConfigError, message)
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::with_code(CliErrorCode::IoError, message)
    }

    pub fn boot_failed(message: impl Into<String>) -> Self {
        Self::with_code(CliErrorCode::BootFailed, message)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::boot_failed("Failed to open store: unable to open database file");
        assert_eq!(
            err.to_string(),
            "PETSTORE_CLI_BOOT_FAILED: Failed to open store: unable to open database file"
        );
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
    }

    #[test]
    fn test_io_and_json_errors_map_to_io_code() {
        let err: CliError = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert_eq!(err.message(), "stdout closed");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CliError::from(json_err);
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert!(err.to_string().starts_with("PETSTORE_CLI_IO_ERROR: JSON error:"));
    }
}
