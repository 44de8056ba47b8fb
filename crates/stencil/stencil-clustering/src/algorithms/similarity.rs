//! Cosine similarity over sparse rows and the condensed pairwise distance
//! matrix.

use rayon::prelude::*;

use super::tfidf::SparseVector;

/// Cosine similarity between two sparse vectors.
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        0.0
    } else {
        (a.dot(b) / denom).clamp(-1.0, 1.0)
    }
}

/// Cosine distance `1 - cos`, clamped to `[0, 2]`.
pub fn cosine_distance(a: &SparseVector, b: &SparseVector) -> f64 {
    (1.0 - cosine_similarity(a, b)).clamp(0.0, 2.0)
}

/// Upper triangle of a symmetric distance matrix with zero diagonal, stored
/// row by row: `(0,1) (0,2) .. (0,n-1) (1,2) ..`.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedDistances {
    n: usize,
    data: Vec<f64>,
}

impl CondensedDistances {
    /// Wrap an existing condensed vector. `data.len()` must be `n(n-1)/2`.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == n * n.saturating_sub(1) / 2).then_some(Self { n, data })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`. Zero on the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        self.data[condensed_index(self.n, i, j)]
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = condensed_index(self.n, i, j);
        self.data[idx] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Index of the pair `(i, j)`, `i != j`, in a condensed matrix of `n` points.
pub fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

/// All pairwise cosine distances between `rows`.
///
/// Rows are independent, so each row's upper-triangle slice is computed on
/// the rayon pool and the slices are concatenated in row order.
pub fn pairwise_cosine_distances(rows: &[SparseVector]) -> CondensedDistances {
    let n = rows.len();
    let data: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| cosine_distance(&rows[i], &rows[j]))
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<Vec<f64>>>()
        .concat();
    CondensedDistances { n, data }
}
