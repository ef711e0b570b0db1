//! # Pet Store Module
//!
//! Data access for the single `pets` table.

pub mod backend;
pub mod config;
pub mod errors;
pub mod schema;
pub mod sqlite;

pub use backend::PetStore;
pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use sqlite::SqlitePetStore;
