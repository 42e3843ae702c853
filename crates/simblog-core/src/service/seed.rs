//! Sample corpus for development databases

use tracing::{debug, info};

use super::{create_document, CreateDocumentRequest};
use crate::config::AppConfig;
use crate::content::Sanitizer;
use crate::error::{Result, SimblogError};
use crate::store::DocumentStore;

const SAMPLES: &[(&str, &str, &str)] = &[
    (
        "ai",
        "what-is-rag",
        "<h1>RAG چیست؟</h1><p>RAG (Retrieval-Augmented Generation) روشی برای غنی‌سازی پاسخ‌های مدل‌های زبانی با جست‌وجو در پایگاه دانش است.</p>",
    ),
    (
        "ai",
        "embeddings-for-search",
        "<h1>Embeddings for search</h1><p>Embeddings turn text into vectors so search can rank documents by similarity instead of exact keywords. Retrieval works well with a small knowledge base.</p>",
    ),
    (
        "dev",
        "sqlite-in-production",
        "<h1>SQLite in production</h1><p>WAL mode, a busy timeout and short transactions keep a single-file database responsive under concurrent readers.</p>",
    ),
    (
        "news",
        "welcome",
        "<h1>Welcome to {SITE_NAME}</h1><p>News and articles from {AUTHOR}. Estimated reading time: {READING_TIME} min.</p>",
    ),
];

/// Insert the sample corpus, skipping paths that already exist.
///
/// Returns the number of documents inserted.
pub fn seed_documents<S: DocumentStore, Z: Sanitizer + ?Sized>(
    store: S,
    sanitizer: &Z,
    config: &AppConfig,
) -> Result<usize> {
    let mut inserted = 0;
    for (category, path, text) in SAMPLES {
        let request = CreateDocumentRequest {
            category: category.to_string(),
            text: text.to_string(),
            path: path.to_string(),
        };
        match create_document(&store, sanitizer, config, &request) {
            Ok(_) => inserted += 1,
            Err(SimblogError::AlreadyExists { .. }) => {
                debug!(path, "seed document already exists, skipping");
            }
            Err(e) => return Err(e),
        }
    }
    if inserted > 0 {
        info!(inserted, "seeded documents");
    }
    Ok(inserted)
}

/// Number of documents in the sample corpus
pub fn sample_count() -> usize {
    SAMPLES.len()
}
