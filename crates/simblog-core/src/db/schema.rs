//! SQLite database schema for simblog

use crate::error::{Result, SimblogError};
use crate::map_storage_err;
use rusqlite::Connection;

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL CHECK (category <> ''),
    text TEXT NOT NULL DEFAULT '',
    path TEXT NOT NULL UNIQUE CHECK (path <> ''),
    -- JSON array of f32; NULL when never generated or no tokens
    embedding TEXT,
    created TEXT NOT NULL,
    updated TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_documents_category ON documents(category);

CREATE TABLE IF NOT EXISTS index_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

/// Create the schema, or verify that an existing database is readable.
///
/// Documents are the source of truth, so a database written by a newer
/// schema is refused instead of being dropped and recreated.
pub fn create_schema(conn: &Connection) -> Result<()> {
    let current_version: Option<i32> = conn
        .query_row(
            "SELECT value FROM index_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok();

    match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| map_storage_err!("create schema", e))?;
            conn.execute(
                "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )
            .map_err(|e| map_storage_err!("record schema version", e))?;
            tracing::debug!(version = CURRENT_SCHEMA_VERSION, "database schema created");
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => {}
        Some(v) if v < CURRENT_SCHEMA_VERSION => {
            // No released schema predates version 1 besides the unversioned one
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| map_storage_err!("migrate schema", e))?;
            conn.execute(
                "UPDATE index_meta SET value = ?1 WHERE key = 'schema_version'",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )
            .map_err(|e| map_storage_err!("record schema version", e))?;
            tracing::info!(
                "Database schema updated from version {} to {}",
                v,
                CURRENT_SCHEMA_VERSION
            );
        }
        Some(v) => {
            return Err(SimblogError::Other(format!(
                "database schema version {} is newer than supported version {}",
                v, CURRENT_SCHEMA_VERSION
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
pub fn force_set_schema_version(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('schema_version', ?1)",
        [&version.to_string()],
    )?;
    Ok(())
}
