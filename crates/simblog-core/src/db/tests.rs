use super::*;
use crate::document::NewDocument;
use crate::error::SimblogError;
use crate::store::DocumentStore;
use std::time::Duration;
use tempfile::tempdir;

fn new_doc(path: &str, category: &str, text: &str) -> NewDocument {
    NewDocument {
        category: category.to_string(),
        text: text.to_string(),
        path: path.to_string(),
        embedding: None,
    }
}

#[test]
fn test_database_open_creates_tables() {
    let dir = tempdir().unwrap();
    let db = Database::open(&dir.path().join("simblog.db"), Duration::from_secs(1)).unwrap();

    let count: i64 = db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('documents', 'index_meta')",
            [],
            |row: &rusqlite::Row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(db.get_schema_version().unwrap(), CURRENT_SCHEMA_VERSION as i64);
    assert_eq!(db.get_document_count().unwrap(), 0);
}

#[test]
fn test_database_open_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("deeper").join("simblog.db");
    let _db = Database::open(&db_path, Duration::from_secs(1)).unwrap();
    assert!(db_path.exists());
}

#[test]
fn test_reopen_preserves_documents() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("simblog.db");

    {
        let db = Database::open(&db_path, Duration::from_secs(1)).unwrap();
        db.insert(&new_doc("first", "news", "<p>hello</p>")).unwrap();
    }

    let db = Database::open(&db_path, Duration::from_secs(1)).unwrap();
    assert_eq!(db.get_document_count().unwrap(), 1);
    let doc = db.get_by_path("first").unwrap().unwrap();
    assert_eq!(doc.text, "<p>hello</p>");
}

#[test]
fn test_newer_schema_is_refused() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("simblog.db");

    {
        let db = Database::open(&db_path, Duration::from_secs(1)).unwrap();
        schema::force_set_schema_version(&db.conn, CURRENT_SCHEMA_VERSION + 1).unwrap();
    }

    let err = Database::open(&db_path, Duration::from_secs(1)).unwrap_err();
    assert!(err.to_string().contains("newer than supported"));
}

#[test]
fn test_insert_and_get_by_path() {
    let db = Database::open_in_memory().unwrap();
    let mut doc = new_doc("what-is-rag", "ai", "<h1>RAG</h1>");
    doc.embedding = Some(vec![0.6, 0.8]);

    let created = db.insert(&doc).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.embedding, Some(vec![0.6, 0.8]));

    let loaded = db.get_by_path("what-is-rag").unwrap().unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.category, "ai");
    assert_eq!(loaded.text, "<h1>RAG</h1>");
    assert_eq!(loaded.embedding, Some(vec![0.6, 0.8]));
}

#[test]
fn test_get_missing_path_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_by_path("nope").unwrap().is_none());
}

#[test]
fn test_duplicate_path_is_already_exists() {
    let db = Database::open_in_memory().unwrap();
    db.insert(&new_doc("dup", "a", "one")).unwrap();

    let err = db.insert(&new_doc("dup", "b", "two")).unwrap_err();
    assert!(matches!(
        err,
        SimblogError::AlreadyExists { ref value, .. } if value == "dup"
    ));
    assert_eq!(db.get_document_count().unwrap(), 1);
}

#[test]
fn test_empty_category_is_rejected_by_storage() {
    let db = Database::open_in_memory().unwrap();
    let err = db.insert(&new_doc("p", "", "text")).unwrap_err();
    assert!(matches!(err, SimblogError::StorageUnavailable { .. }));
}

#[test]
fn test_list_excluding_orders_by_path() {
    let db = Database::open_in_memory().unwrap();
    for path in ["charlie", "alpha", "bravo", "delta"] {
        db.insert(&new_doc(path, "x", path)).unwrap();
    }

    let others = db.list_excluding("bravo").unwrap();
    let paths: Vec<&str> = others.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["alpha", "charlie", "delta"]);
}

#[test]
fn test_list_filters_by_category() {
    let db = Database::open_in_memory().unwrap();
    db.insert(&new_doc("b-post", "dev", "b")).unwrap();
    db.insert(&new_doc("a-post", "dev", "a")).unwrap();
    db.insert(&new_doc("news-post", "news", "n")).unwrap();

    let all = db.list(None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].path, "a-post");

    let dev: Vec<String> = db
        .list(Some("dev"))
        .unwrap()
        .into_iter()
        .map(|d| d.path)
        .collect();
    assert_eq!(dev, vec!["a-post", "b-post"]);

    assert!(db.list(Some("missing")).unwrap().is_empty());
}

#[test]
fn test_update_embedding_overwrites() {
    let db = Database::open_in_memory().unwrap();
    let mut doc = new_doc("legacy", "x", "text");
    doc.embedding = Some(vec![1.0; 128]);
    let created = db.insert(&doc).unwrap();

    db.update_embedding(created.id, &[0.0, 1.0, 0.0]).unwrap();

    let loaded = db.get_by_path("legacy").unwrap().unwrap();
    assert_eq!(loaded.embedding, Some(vec![0.0, 1.0, 0.0]));
    assert_eq!(loaded.updated, created.updated);
}

#[test]
fn test_update_embedding_unknown_id_fails() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.update_embedding(999, &[1.0]).is_err());
}

#[test]
fn test_unreadable_embedding_is_absent() {
    let db = Database::open_in_memory().unwrap();
    let created = db.insert(&new_doc("broken", "x", "text")).unwrap();
    db.conn
        .execute(
            "UPDATE documents SET embedding = 'not json' WHERE id = ?1",
            [created.id],
        )
        .unwrap();

    let loaded = db.get_by_path("broken").unwrap().unwrap();
    assert!(loaded.embedding.is_none());
}

#[test]
fn test_empty_embedding_is_not_stored() {
    let db = Database::open_in_memory().unwrap();
    let mut doc = new_doc("empty-vec", "x", "");
    doc.embedding = Some(vec![]);
    let created = db.insert(&doc).unwrap();
    assert!(created.embedding.is_none());
    assert!(db.get_by_path("empty-vec").unwrap().unwrap().embedding.is_none());
}
