//! Operations exposed to front ends
//!
//! Each function takes the store by reference; callers own the connection
//! and decide how errors are rendered.

pub mod seed;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::content::{self, Sanitizer};
use crate::document::{Document, NewDocument};
use crate::embedding;
use crate::error::{Result, SimblogError};
use crate::recommend::{RecommendOptions, Recommender, Related};
use crate::store::DocumentStore;

pub use seed::seed_documents;

/// Input for [`create_document`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub category: String,
    pub text: String,
    pub path: String,
}

/// Load a document with its related documents
pub fn fetch_with_related<S: DocumentStore>(
    store: S,
    path: &str,
    options: RecommendOptions,
) -> Result<Related> {
    let path = path.trim();
    if path.is_empty() {
        return Err(SimblogError::UsageError("path is required".to_string()));
    }
    Recommender::new(store, options).related(path)
}

/// Validate, prepare and store a new document
pub fn create_document<S: DocumentStore, Z: Sanitizer + ?Sized>(
    store: S,
    sanitizer: &Z,
    config: &AppConfig,
    request: &CreateDocumentRequest,
) -> Result<Document> {
    let category = request.category.trim();
    let path = request.path.trim();

    if category.is_empty() {
        return Err(SimblogError::UsageError("category is required".to_string()));
    }
    if path.is_empty() {
        return Err(SimblogError::UsageError("path is required".to_string()));
    }
    let slugged = slug::slugify(path);
    if slugged != path {
        crate::bail_invalid!("path", format!("{} (expected a slug like '{}')", path, slugged));
    }

    let reading_minutes = content::reading_time_minutes(&sanitizer.sanitize(&request.text));
    let values =
        content::placeholder_values(&config.site, category, path, reading_minutes, Utc::now());
    let replaced = content::replace_placeholders(&request.text, &values);
    let text = content::ensure_cta(&sanitizer.sanitize(&replaced), &config.site.cta_html);

    let embedding = embedding::embed(&text);
    if embedding.is_none() {
        debug!(path, "new document has no tokens, storing without embedding");
    }

    let document = store.insert(&NewDocument {
        category: category.to_string(),
        text,
        path: path.to_string(),
        embedding,
    })?;

    info!(id = document.id, path = %document.path, "created document");
    Ok(document)
}

/// All documents ordered by path, optionally restricted to one category
pub fn list_documents<S: DocumentStore>(store: S, category: Option<&str>) -> Result<Vec<Document>> {
    let category = category.map(str::trim).filter(|c| !c.is_empty());
    store.list(category)
}
