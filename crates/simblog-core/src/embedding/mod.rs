//! Offline hashing-trick embeddings
//!
//! Text is stripped of markup, split into lowercase letter/digit tokens and
//! each token is hashed into one of [`EMBEDDING_DIM`] buckets. The bucket
//! counts are L2-normalized. No model, no network.

use crate::text;

/// Embedding dimension.
///
/// Changing this makes every stored vector legacy; bump
/// [`EMBEDDING_VERSION`] together with it.
pub const EMBEDDING_DIM: usize = 256;

/// Version of the tokenizer + hash + dimension combination
pub const EMBEDDING_VERSION: u32 = 1;

const FNV_OFFSET_BASIS_32: u32 = 0x811c_9dc5;
const FNV_PRIME_32: u32 = 0x0100_0193;

/// Embed text into a unit-length vector of [`EMBEDDING_DIM`] components.
///
/// Returns `None` when the text has no tokens after markup is stripped;
/// callers treat that as "no similarity for this document", not an error.
pub fn embed(input: &str) -> Option<Vec<f32>> {
    let plain = text::normalize(input);
    let plain = plain.trim();
    if plain.is_empty() {
        return None;
    }

    let mut counts = vec![0.0f64; EMBEDDING_DIM];
    for token in text::tokenize(plain) {
        counts[bucket(&token, EMBEDDING_DIM)] += 1.0;
    }

    let norm = counts.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return None;
    }

    Some(counts.iter().map(|v| (v / norm) as f32).collect())
}

/// Whether a stored vector can be compared with freshly generated ones
pub fn is_current(vector: &[f32]) -> bool {
    vector.len() == EMBEDDING_DIM
}

fn bucket(token: &str, dim: usize) -> usize {
    (fnv1a_32(token.as_bytes()) % dim as u32) as usize
}

fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS_32;
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME_32);
    }
    hash
}
