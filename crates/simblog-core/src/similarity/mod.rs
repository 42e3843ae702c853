//! Cosine similarity and candidate ranking

/// A candidate paired with its similarity to the query vector
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult<T> {
    /// The scored candidate
    pub item: T,
    /// Cosine similarity (-1.0 to 1.0)
    pub score: f64,
}

/// Cosine similarity between two vectors, accumulated in `f64`.
///
/// Empty or unequal-length inputs score 0.0, as does a zero-norm input.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let x = f64::from(*x);
        let y = f64::from(*y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}

/// Score every candidate against `query` and order by descending score.
///
/// Non-finite scores are dropped. The sort is stable: candidates with equal
/// scores keep the order they were given in.
pub fn rank<T, V>(
    query: &[f32],
    candidates: impl IntoIterator<Item = (T, V)>,
) -> Vec<SimilarityResult<T>>
where
    V: AsRef<[f32]>,
{
    let mut results: Vec<SimilarityResult<T>> = candidates
        .into_iter()
        .filter_map(|(item, vector)| {
            let score = cosine(query, vector.as_ref());
            if score.is_finite() {
                Some(SimilarityResult { item, score })
            } else {
                tracing::debug!(score, "dropping non-finite similarity score");
                None
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

/// [`rank`], keeping at most `limit` results
pub fn top_k<T, V>(
    query: &[f32],
    candidates: impl IntoIterator<Item = (T, V)>,
    limit: usize,
) -> Vec<SimilarityResult<T>>
where
    V: AsRef<[f32]>,
{
    let mut results = rank(query, candidates);
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests;
