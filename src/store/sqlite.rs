//! # SQLite Pet Store
//!
//! [`PetStore`] over a single `rusqlite` connection. Every statement is
//! parameterized; request values never reach the SQL text.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::pet::Pet;

use super::backend::PetStore;
use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::schema;

/// SQLite-backed pet store
pub struct SqlitePetStore {
    conn: Mutex<Connection>,
}

impl SqlitePetStore {
    /// Open the database described by `config` and bootstrap the schema.
    ///
    /// With `reset_schema` set the pets table is dropped first.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        conn.busy_timeout(config.busy_timeout())?;

        tracing::info!(path = %config.path, "opened pet store");

        Self::with_connection(conn, config.reset_schema)
    }

    /// Open a fresh in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, false)
    }

    fn with_connection(conn: Connection, reset: bool) -> StoreResult<Self> {
        if reset {
            schema::reset_tables(&conn)?;
        } else {
            schema::create_tables(&conn)?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Internal("store connection lock poisoned".to_string()))
    }
}

/// Zero affected rows is the not-found signal.
fn require_affected(count: usize) -> StoreResult<usize> {
    if count == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(count)
    }
}

impl PetStore for SqlitePetStore {
    fn insert(&self, name: &str) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO pets (name) VALUES (?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    fn select_by_id(&self, id: i64) -> StoreResult<Pet> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name FROM pets WHERE id = ?1",
            params![id],
            |row| Ok(Pet::new(row.get(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?
        .ok_or(StoreError::NotFound)
    }

    fn select_range(&self, start: i64, count: i64) -> StoreResult<Vec<Pet>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM pets LIMIT ?1 OFFSET ?2")?;
        let rows = stmt.query_map(params![count, start], |row| {
            Ok(Pet::new(row.get(0)?, row.get::<_, String>(1)?))
        })?;

        let mut pets = Vec::new();
        for row in rows {
            pets.push(row?);
        }
        Ok(pets)
    }

    fn update_name_by_id(&self, id: i64, name: &str) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count = conn.execute(
            "UPDATE pets SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        require_affected(count)
    }

    fn delete_by_id(&self, id: i64) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count = conn.execute("DELETE FROM pets WHERE id = ?1", params![id])?;
        require_affected(count)
    }
}
