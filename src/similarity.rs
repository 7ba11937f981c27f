//! Sparse term vectors and cosine similarity.

use ahash::AHashMap;
use std::cmp::Ordering;

/// Normalized word -> weight.
pub type SparseVector = AHashMap<String, f64>;

/// Entries ordered by word. Sums run in this order so the result does not
/// depend on the map's hash seed.
fn sorted_entries(vector: &SparseVector) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = vector.iter().map(|(w, &x)| (w.as_str(), x)).collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Cosine of the angle between two sparse vectors.
///
/// Zero when either vector has zero norm. The result is clamped to [-1, 1].
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let a = sorted_entries(a);
    let b = sorted_entries(b);

    let norm_a: f64 = a.iter().map(|(_, x)| x * x).sum();
    let norm_b: f64 = b.iter().map(|(_, x)| x * x).sum();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let mut dot = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> SparseVector {
        entries.iter().map(|(w, x)| (w.to_string(), *x)).collect()
    }

    #[test]
    fn test_identical_vectors() {
        let v = vector(&[("cat", 0.4), ("sat", -1.3), ("mat", 2.0)]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector() {
        let v = vector(&[("cat", 0.4)]);
        let zero = vector(&[("cat", 0.0), ("dog", 0.0)]);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&SparseVector::new(), &v), 0.0);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        let a = vector(&[("cat", 1.0)]);
        let b = vector(&[("dog", 1.0)]);
        let c = vector(&[("cat", -2.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert!((cosine_similarity(&a, &c) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_result_independent_of_insertion_order() {
        let entries: Vec<(String, f64)> = (0..200)
            .map(|i| (format!("w{i}"), 0.1 + (i as f64) * 1e-3 + 1.0 / (i as f64 + 3.0)))
            .collect();
        let other: Vec<(String, f64)> = (0..200)
            .map(|i| (format!("w{i}"), 1.0 / (i as f64 + 7.0)))
            .collect();

        let forward_a: SparseVector = entries.iter().cloned().collect();
        let reverse_a: SparseVector = entries.iter().rev().cloned().collect();
        let forward_b: SparseVector = other.iter().cloned().collect();
        let reverse_b: SparseVector = other.iter().rev().cloned().collect();

        let expected = cosine_similarity(&forward_a, &forward_b).to_bits();
        assert_eq!(cosine_similarity(&reverse_a, &reverse_b).to_bits(), expected);
        assert_eq!(cosine_similarity(&reverse_b, &forward_a).to_bits(), expected);
    }

    #[test]
    fn test_partial_overlap() {
        let a = vector(&[("x", 1.0), ("y", 1.0)]);
        let b = vector(&[("x", 1.0)]);
        let expected = 1.0 / 2f64.sqrt();
        assert!((cosine_similarity(&a, &b) - expected).abs() < 1e-12);
    }
}
