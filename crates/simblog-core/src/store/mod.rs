//! Storage contract consumed by the recommendation core

use std::time::{Duration, Instant};

use crate::document::{Document, NewDocument};
use crate::error::{Result, SimblogError};

/// Persistent document storage.
///
/// Each `update_embedding` call is its own atomic unit; there is no
/// transaction spanning several documents. Implementations own connection
/// pooling and retry.
pub trait DocumentStore {
    /// Look up a document by its path
    fn get_by_path(&self, path: &str) -> Result<Option<Document>>;

    /// Every document except the one at `path`
    fn list_excluding(&self, path: &str) -> Result<Vec<Document>>;

    /// Overwrite a document's stored embedding
    fn update_embedding(&self, id: i64, embedding: &[f32]) -> Result<()>;

    /// Insert a new document; a duplicate path is `AlreadyExists`
    fn insert(&self, document: &NewDocument) -> Result<Document>;

    /// All documents ordered by path, optionally restricted to one category
    fn list(&self, category: Option<&str>) -> Result<Vec<Document>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn get_by_path(&self, path: &str) -> Result<Option<Document>> {
        (**self).get_by_path(path)
    }

    fn list_excluding(&self, path: &str) -> Result<Vec<Document>> {
        (**self).list_excluding(path)
    }

    fn update_embedding(&self, id: i64, embedding: &[f32]) -> Result<()> {
        (**self).update_embedding(id, embedding)
    }

    fn insert(&self, document: &NewDocument) -> Result<Document> {
        (**self).insert(document)
    }

    fn list(&self, category: Option<&str>) -> Result<Vec<Document>> {
        (**self).list(category)
    }
}

/// Point in time by which a request's storage work must be done
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Instant::now().checked_add(timeout),
        }
    }

    /// A deadline that never expires
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }

    /// Time left before expiry, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires_at| expires_at.saturating_duration_since(Instant::now()))
    }

    /// Fail with `StorageUnavailable` once the deadline has passed
    pub fn check(&self, operation: &str) -> Result<()> {
        if self.is_expired() {
            return Err(SimblogError::storage(operation, "deadline exceeded"));
        }
        Ok(())
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}
