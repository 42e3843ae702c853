//! SQLite storage for simblog documents

mod documents;
mod schema;

use crate::error::{Result, SimblogError};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub use schema::{create_schema, CURRENT_SCHEMA_VERSION};

/// SQLite-backed document store.
///
/// Opened once at startup and shared by reference with every operation;
/// closing happens on drop.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file at `db_path`.
    ///
    /// `busy_timeout` bounds how long a statement waits on a lock held by
    /// another connection before failing.
    pub fn open(db_path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path).map_err(|e| {
            SimblogError::storage(
                "open database",
                format!("{}: {}", db_path.display(), e),
            )
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| SimblogError::storage("enable WAL mode", e))?;

        Self::init(conn, busy_timeout)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SimblogError::storage("open in-memory database", e))?;
        Self::init(conn, Duration::from_secs(5))
    }

    fn init(conn: Connection, busy_timeout: Duration) -> Result<Self> {
        conn.busy_timeout(busy_timeout)
            .map_err(|e| SimblogError::storage("set busy timeout", e))?;

        create_schema(&conn)?;

        tracing::debug!(busy_timeout_ms = busy_timeout.as_millis() as u64, "database opened");
        Ok(Database { conn })
    }

    pub fn get_document_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))
            .map_err(|e| SimblogError::storage("count documents", e))
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM index_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| SimblogError::storage("get schema version", e))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Fold the WAL back into the main file before the handle goes away
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

#[cfg(test)]
mod tests;
