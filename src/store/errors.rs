//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row was returned or affected
    #[error("no rows in result set")]
    NotFound,

    /// Underlying SQLite failure
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failure outside the engine (poisoned lock, cancelled blocking task)
    #[error("{0}")]
    Internal(String),
}

impl StoreError {
    /// Whether this is the not-found signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
