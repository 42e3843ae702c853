//! Related-content recommendations
//!
//! For a requested document the recommender refreshes its embedding,
//! makes sure every other document has a comparable vector (reusing stored
//! ones of the right dimension, regenerating the rest) and returns the
//! closest matches by cosine similarity.
//!
//! Storage reads are fatal on failure. Storage writes only refresh the
//! vector cache: a failed write is logged and the request carries on with
//! the in-memory vector.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::document::Document;
use crate::embedding;
use crate::error::{Result, SimblogError};
use crate::logging::VectorCacheMetrics;
use crate::similarity;
use crate::store::{Deadline, DocumentStore};
use crate::{log_cache_metrics, trace_time};

/// Default number of related documents returned
pub const DEFAULT_LIMIT: usize = 5;

/// Default time budget for a request's storage work
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Options for a recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Maximum number of related documents
    pub limit: usize,
    /// Storage time budget; `None` disables the deadline
    pub timeout: Option<Duration>,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// A document together with its most similar peers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Related {
    pub document: Document,
    /// Most similar first; empty when no similarity could be computed
    pub similar: Vec<Document>,
}

/// Computes related documents over a [`DocumentStore`]
pub struct Recommender<S> {
    store: S,
    options: RecommendOptions,
}

impl<S: DocumentStore> Recommender<S> {
    pub fn new(store: S, options: RecommendOptions) -> Self {
        Self { store, options }
    }

    /// Load the document at `path` and rank every other document against it.
    ///
    /// Returns `DocumentNotFound` when `path` does not exist and
    /// `StorageUnavailable` when a read fails or the deadline passes.
    pub fn related(&self, path: &str) -> Result<Related> {
        let start = Instant::now();
        let deadline = self
            .options
            .timeout
            .map(Deadline::after)
            .unwrap_or_default();
        let metrics = VectorCacheMetrics::new();

        deadline.check("load document")?;
        let mut document = self
            .store
            .get_by_path(path)?
            .ok_or_else(|| SimblogError::not_found(path))?;
        deadline.check("load document")?;

        let query = match embedding::embed(&document.text) {
            Some(fresh) => {
                deadline.check("persist embedding")?;
                if self.try_persist(&document, &fresh, &metrics) {
                    document.embedding = Some(fresh.clone());
                }
                fresh
            }
            None => match document.embedding.clone().filter(|v| !v.is_empty()) {
                Some(stored) => {
                    tracing::debug!(path, "no tokens in text, using stored embedding");
                    stored
                }
                None => {
                    tracing::debug!(path, "no embedding available, skipping similarity");
                    return Ok(Related {
                        document,
                        similar: Vec::new(),
                    });
                }
            },
        };

        deadline.check("list candidate documents")?;
        let candidates = self.store.list_excluding(path)?;
        deadline.check("list candidate documents")?;

        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let vector =
                self.candidate_vector(&candidate, query.len(), &deadline, &metrics)?;
            if let Some(vector) = vector {
                scored.push((candidate, vector));
            }
        }
        deadline.check("persist embedding")?;

        let similar = similarity::top_k(&query, scored, self.options.limit)
            .into_iter()
            .map(|result| result.item)
            .collect();

        log_cache_metrics!(&metrics, "related");
        trace_time!(start, "related", path = path);

        Ok(Related { document, similar })
    }

    /// A vector for `candidate` comparable with a query of length `dim`, or
    /// `None` when the candidate cannot be scored.
    fn candidate_vector(
        &self,
        candidate: &Document,
        dim: usize,
        deadline: &Deadline,
        metrics: &VectorCacheMetrics,
    ) -> Result<Option<Vec<f32>>> {
        if let Some(stored) = candidate.embedding_with_dim(dim) {
            metrics.record_hit();
            return Ok(Some(stored.to_vec()));
        }

        metrics.record_miss();
        if let Some(stored) = candidate.embedding.as_ref().filter(|v| !v.is_empty()) {
            tracing::debug!(
                path = %candidate.path,
                stored_dim = stored.len(),
                dim,
                "regenerating legacy embedding"
            );
        }

        let fresh = match embedding::embed(&candidate.text) {
            Some(fresh) if fresh.len() == dim => fresh,
            Some(fresh) => {
                tracing::debug!(
                    path = %candidate.path,
                    fresh_dim = fresh.len(),
                    dim,
                    "skipping candidate with mismatched dimension"
                );
                return Ok(None);
            }
            None => return Ok(None),
        };

        deadline.check("persist embedding")?;
        self.try_persist(candidate, &fresh, metrics);
        Ok(Some(fresh))
    }

    /// Best-effort write of a freshly computed vector. Failures are logged
    /// and swallowed; returns whether the write succeeded.
    fn try_persist(
        &self,
        document: &Document,
        vector: &[f32],
        metrics: &VectorCacheMetrics,
    ) -> bool {
        match self.store.update_embedding(document.id, vector) {
            Ok(()) => true,
            Err(e) => {
                metrics.record_persist_failure();
                tracing::warn!(
                    id = document.id,
                    path = %document.path,
                    error = %e,
                    "failed to persist embedding"
                );
                false
            }
        }
    }
}
