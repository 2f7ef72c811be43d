// ============================================================
// Layer 5: Sparse Feature Vector
// ============================================================
// A TF-IDF row for one SMS message touches a handful of the
// 10,000 vocabulary terms, so rows are stored as sorted
// (index, value) pairs. Model weights stay dense.
//
// The linfa estimators only take dense ndarray records, so
// training rows are expanded with `dense_matrix` right before a
// fit and dropped afterwards.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    indices: Vec<usize>,
    values:  Vec<f64>,
}

impl SparseVector {
    /// Build from (index, value) pairs. Pairs are sorted by index;
    /// duplicate indices are summed and zeros dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(i, _)| i);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values:  Vec<f64>   = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            match indices.last() {
                Some(&last) if last == i => {
                    if let Some(acc) = values.last_mut() {
                        *acc += v;
                    }
                }
                _ => {
                    indices.push(i);
                    values.push(v);
                }
            }
        }

        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        Self { indices, values }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense vector. Indices past the end of
    /// `dense` contribute nothing.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(i, v)| dense.get(i).map(|w| w * v))
            .sum()
    }

    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// dense += scale * self
    pub fn add_scaled_to(&self, dense: &mut [f64], scale: f64) {
        for (i, v) in self.iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot += scale * v;
            }
        }
    }

    /// Scale to unit L2 norm. The zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.squared_norm().sqrt();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

/// Expand sparse rows into an `n_rows × n_features` matrix.
/// Indices at or past `n_features` are ignored.
pub fn dense_matrix(rows: &[SparseVector], n_features: usize) -> Array2<f64> {
    let mut matrix = Array2::zeros((rows.len(), n_features));
    for (mut dense, row) in matrix.rows_mut().into_iter().zip(rows) {
        for (i, v) in row.iter().filter(|&(i, _)| i < n_features) {
            dense[i] = v;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 0.5)]);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn test_dot_and_axpy() {
        let v = SparseVector::from_pairs(vec![(0, 1.0), (2, 3.0)]);
        assert_eq!(v.dot(&[2.0, 5.0, 1.0]), 5.0);

        let mut w = vec![0.0; 3];
        v.add_scaled_to(&mut w, 2.0);
        assert_eq!(w, vec![2.0, 0.0, 6.0]);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let mut v = SparseVector::default();
        v.l2_normalize();
        assert!(v.is_empty());
    }

    #[test]
    fn test_dense_matrix_places_values() {
        let rows = vec![
            SparseVector::from_pairs(vec![(1, 0.5)]),
            SparseVector::from_pairs(vec![(0, 2.0), (5, 9.0)]),
        ];
        let m = dense_matrix(&rows, 3);
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m[[0, 1]], 0.5);
        assert_eq!(m[[1, 0]], 2.0);
        assert_eq!(m.row(1).sum(), 2.0);
    }
}
