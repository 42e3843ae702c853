use super::*;
use crate::embedding::{embed, EMBEDDING_DIM};

fn unit(dim: usize, hot: &[usize]) -> Vec<f32> {
    let mut v = vec![0.0f32; dim];
    for i in hot {
        v[*i] = 1.0;
    }
    v
}

#[test]
fn test_self_similarity_is_one() {
    for text in ["fish swim in water", "a b c d e f g", "<h1>Rust</h1> ownership"] {
        let v = embed(text).unwrap();
        let score = cosine(&v, &v);
        assert!(
            (score - 1.0).abs() < 1e-6,
            "self-similarity should be 1.0, got {score}"
        );
    }

    let raw = vec![3.0f32, -4.0, 0.5];
    assert!((cosine(&raw, &raw) - 1.0).abs() < 1e-9);
}

#[test]
fn test_unequal_lengths_score_zero() {
    let a = vec![1.0f32; 256];
    let b = vec![1.0f32; 128];
    assert_eq!(cosine(&a, &b), 0.0);
    assert_eq!(cosine(&b, &a), 0.0);
}

#[test]
fn test_empty_and_zero_vectors_score_zero() {
    assert_eq!(cosine(&[], &[]), 0.0);
    let zero = vec![0.0f32; 4];
    let one = vec![1.0f32; 4];
    assert_eq!(cosine(&zero, &one), 0.0);
    assert_eq!(cosine(&zero, &zero), 0.0);
}

#[test]
fn test_orthogonal_and_opposite() {
    let a = unit(4, &[0]);
    let b = unit(4, &[1]);
    assert_eq!(cosine(&a, &b), 0.0);

    let neg: Vec<f32> = a.iter().map(|x| -x).collect();
    assert!((cosine(&a, &neg) + 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_ignores_magnitude() {
    let a = vec![1.0f32, 2.0, 3.0];
    let b = vec![2.0f32, 4.0, 6.0];
    assert!((cosine(&a, &b) - 1.0).abs() < 1e-9);
}

#[test]
fn test_rank_orders_by_descending_score() {
    let query = embed("fish swim in water").unwrap();
    let candidates = vec![
        ("cars", embed("cars drive on roads").unwrap()),
        ("lakes", embed("fish swim in lakes").unwrap()),
        ("same", embed("water in swim fish").unwrap()),
    ];

    let ranked = rank(&query, candidates);
    let order: Vec<&str> = ranked.iter().map(|r| r.item).collect();
    assert_eq!(order, vec!["same", "lakes", "cars"]);

    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_rank_ties_keep_input_order() {
    let query = unit(EMBEDDING_DIM, &[0, 1]);
    let tied = unit(EMBEDDING_DIM, &[0]);
    let candidates = vec![
        ("first", tied.clone()),
        ("better", query.clone()),
        ("second", tied.clone()),
        ("third", tied),
    ];

    let ranked = rank(&query, candidates);
    let order: Vec<&str> = ranked.iter().map(|r| r.item).collect();
    assert_eq!(order, vec!["better", "first", "second", "third"]);
}

#[test]
fn test_rank_drops_non_finite_scores() {
    let query = vec![1.0f32, 0.0];
    let candidates = vec![
        ("nan", vec![f32::NAN, 1.0]),
        ("inf", vec![f32::INFINITY, 0.0]),
        ("ok", vec![1.0, 1.0]),
    ];

    let ranked = rank(&query, candidates);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].item, "ok");
}

#[test]
fn test_rank_mismatched_dimension_scores_zero() {
    let query = unit(EMBEDDING_DIM, &[3]);
    let ranked = rank(&query, vec![("legacy", unit(128, &[3]))]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, 0.0);
}

#[test]
fn test_top_k_truncates() {
    let query = unit(8, &[0]);
    let candidates: Vec<(usize, Vec<f32>)> = (0..8).map(|i| (i, unit(8, &[0, i]))).collect();

    let top = top_k(&query, candidates, 5);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].item, 0);

    let few = top_k(&query, vec![(1usize, unit(8, &[0]))], 5);
    assert_eq!(few.len(), 1);
}
