use chrono::{DateTime, Utc};
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use crate::document::{Document, NewDocument};
use crate::error::{Result, SimblogError};
use crate::map_storage_err;
use crate::store::DocumentStore;

const SELECT_COLUMNS: &str = "SELECT id, category, text, path, embedding, created, updated FROM documents";

struct ExtractedDocumentRow {
    id: i64,
    category: String,
    text: String,
    path: String,
    embedding_json: Option<String>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

fn extract_document_row(row: &Row) -> rusqlite::Result<ExtractedDocumentRow> {
    Ok(ExtractedDocumentRow {
        id: row.get(0)?,
        category: row.get(1)?,
        text: row.get(2)?,
        path: row.get(3)?,
        embedding_json: row.get(4)?,
        created: row.get(5)?,
        updated: row.get(6)?,
    })
}

impl From<ExtractedDocumentRow> for Document {
    fn from(row: ExtractedDocumentRow) -> Self {
        let embedding = row
            .embedding_json
            .as_deref()
            .and_then(|json| parse_embedding(&row.path, json));
        Document {
            id: row.id,
            category: row.category,
            text: row.text,
            path: row.path,
            embedding,
            created: row.created,
            updated: row.updated,
        }
    }
}

/// A stored vector is a cache; an unreadable one counts as absent
fn parse_embedding(path: &str, json: &str) -> Option<Vec<f32>> {
    match serde_json::from_str::<Vec<f32>>(json) {
        Ok(v) if !v.is_empty() => Some(v),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(path, error = %e, "ignoring unreadable stored embedding");
            None
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl super::Database {
    fn query_documents(
        &self,
        operation: &str,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Document>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| map_storage_err!(operation, e))?;
        let rows = stmt
            .query_map(params, extract_document_row)
            .map_err(|e| map_storage_err!(operation, e))?;

        let mut documents = Vec::new();
        for row in rows {
            let row = row.map_err(|e| map_storage_err!(operation, e))?;
            documents.push(Document::from(row));
        }
        Ok(documents)
    }
}

impl DocumentStore for super::Database {
    fn get_by_path(&self, path: &str) -> Result<Option<Document>> {
        let sql = format!("{SELECT_COLUMNS} WHERE path = ?1");
        let row = self
            .conn
            .query_row(&sql, params![path], extract_document_row)
            .optional()
            .map_err(|e| map_storage_err!("load document", e))?;
        Ok(row.map(Document::from))
    }

    fn list_excluding(&self, path: &str) -> Result<Vec<Document>> {
        let sql = format!("{SELECT_COLUMNS} WHERE path <> ?1 ORDER BY path ASC");
        self.query_documents("list candidate documents", &sql, params![path])
    }

    fn update_embedding(&self, id: i64, embedding: &[f32]) -> Result<()> {
        let json = serde_json::to_string(embedding)?;
        let changed = self
            .conn
            .execute(
                "UPDATE documents SET embedding = ?1 WHERE id = ?2",
                params![json, id],
            )
            .map_err(|e| map_storage_err!("update embedding", e))?;

        if changed == 0 {
            return Err(SimblogError::Other(format!(
                "no document with id {} to update",
                id
            )));
        }
        Ok(())
    }

    fn insert(&self, document: &NewDocument) -> Result<Document> {
        let now = Utc::now();
        let embedding_json = document
            .embedding
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(serde_json::to_string)
            .transpose()?;

        self.conn
            .execute(
                "INSERT INTO documents (category, text, path, embedding, created, updated) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    document.category,
                    document.text,
                    document.path,
                    embedding_json,
                    now,
                    now,
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    SimblogError::already_exists("document", &document.path)
                } else {
                    map_storage_err!("insert document", e)
                }
            })?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, path = %document.path, "document inserted");

        Ok(Document {
            id,
            category: document.category.clone(),
            text: document.text.clone(),
            path: document.path.clone(),
            embedding: document.embedding.clone().filter(|v| !v.is_empty()),
            created: now,
            updated: now,
        })
    }

    fn list(&self, category: Option<&str>) -> Result<Vec<Document>> {
        match category {
            Some(category) => {
                let sql = format!("{SELECT_COLUMNS} WHERE category = ?1 ORDER BY path ASC");
                self.query_documents("list documents", &sql, params![category])
            }
            None => {
                let sql = format!("{SELECT_COLUMNS} ORDER BY path ASC");
                self.query_documents("list documents", &sql, [])
            }
        }
    }
}
