//! # Pet Store Trait

use crate::pet::Pet;

use super::errors::StoreResult;

/// Data access for the pets table.
///
/// Only `id` and `name` are persisted. Implementations report a missing row
/// (zero rows returned or affected) as [`StoreError::NotFound`].
///
/// [`StoreError::NotFound`]: super::errors::StoreError::NotFound
pub trait PetStore: Send + Sync {
    /// Insert a pet, returning the identifier assigned by the store
    fn insert(&self, name: &str) -> StoreResult<i64>;

    /// Fetch one pet
    fn select_by_id(&self, id: i64) -> StoreResult<Pet>;

    /// Fetch up to `count` pets after skipping `start`, in store order
    fn select_range(&self, start: i64, count: i64) -> StoreResult<Vec<Pet>>;

    /// Rename a pet, returning the affected row count
    fn update_name_by_id(&self, id: i64, name: &str) -> StoreResult<usize>;

    /// Delete a pet, returning the affected row count
    fn delete_by_id(&self, id: i64) -> StoreResult<usize>;
}
