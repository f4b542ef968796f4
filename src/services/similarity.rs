use std::cmp::Ordering;

use crate::models::FeatureVector;

/// Cosine similarity of two feature vectors
///
/// A zero-norm vector has no direction; its similarity to anything is 0.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Similarity of the seed row against every row, the seed included
///
/// Returns `None` when `seed` is not a row of `matrix`.
pub fn similarity_scores(matrix: &[FeatureVector], seed: usize) -> Option<Vec<f64>> {
    let seed_vector = matrix.get(seed)?;
    Some(
        matrix
            .iter()
            .map(|row| cosine_similarity(seed_vector, row))
            .collect(),
    )
}

/// Row indices ordered by score, highest first
///
/// Equal scores keep their original row order.
pub fn rank_by_similarity(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FEATURE_COUNT;

    fn vector(values: &[f64]) -> FeatureVector {
        let mut v = [0.0; FEATURE_COUNT];
        v[..values.len()].copy_from_slice(values);
        v
    }

    #[test]
    fn test_self_similarity_is_one() {
        let a = vector(&[0.2, 0.9, 0.4, 1.0, 0.0, 0.33]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let a = vector(&[1.0, 0.0]);
        let b = vector(&[0.0, 1.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_vector_similarity_is_zero() {
        let zero = [0.0; FEATURE_COUNT];
        let a = vector(&[0.5, 0.5]);
        assert_eq!(cosine_similarity(&zero, &a), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
        assert!(!cosine_similarity(&a, &zero).is_nan());
    }

    #[test]
    fn test_scores_include_seed() {
        let matrix = vec![vector(&[1.0, 0.0]), vector(&[1.0, 1.0]), vector(&[0.0, 1.0])];
        let scores = similarity_scores(&matrix, 0).unwrap();

        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!((scores[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_seed_out_of_range() {
        let matrix = vec![vector(&[1.0])];
        assert!(similarity_scores(&matrix, 1).is_none());
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let scores = vec![0.5, 0.9, 0.5, 1.0, 0.9];
        assert_eq!(rank_by_similarity(&scores), vec![3, 1, 4, 0, 2]);
    }
}
