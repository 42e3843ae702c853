//! Document records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document with its optional embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Storage row id
    pub id: i64,
    /// Category label
    pub category: String,
    /// Sanitized HTML body
    pub text: String,
    /// Unique, immutable slug used as the lookup key
    pub path: String,
    /// Embedding vector; absent when never generated or when the text has no tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Document {
    /// Stored embedding, if it has the given dimension
    pub fn embedding_with_dim(&self, dim: usize) -> Option<&[f32]> {
        self.embedding
            .as_deref()
            .filter(|v| !v.is_empty() && v.len() == dim)
    }

    /// Plain-text summary: the first `max_chars` characters of the body text
    pub fn summary(&self, max_chars: usize) -> String {
        let plain = crate::text::normalize(&self.text);
        let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }
        let mut out: String = collapsed.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

/// A document about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub category: String,
    pub text: String,
    pub path: String,
    pub embedding: Option<Vec<f32>>,
}
