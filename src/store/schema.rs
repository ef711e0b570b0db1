//! Pets table bootstrap.

use rusqlite::Connection;

use super::errors::StoreResult;

const TABLE_DROP: &str = "DROP TABLE IF EXISTS pets";

const TABLE_CREATE: &str = "
    CREATE TABLE IF NOT EXISTS pets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50) NOT NULL
    )";

/// Create the pets table if it does not exist yet.
pub fn create_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(TABLE_CREATE)?;
    Ok(())
}

/// Drop the pets table and recreate it empty.
///
/// Every stored pet is lost and identifiers restart at 1.
pub fn reset_tables(conn: &Connection) -> StoreResult<()> {
    tracing::warn!("dropping pets table, all stored pets will be lost");
    conn.execute_batch(TABLE_DROP)?;
    create_tables(conn)
}
