//! Pairwise cosine similarity over L2-normalized document vectors.
//!
//! Diagonal policy: a document with at least one term scores 1.0 against
//! itself; a document with a zero vector scores 0.0 against everything,
//! itself included.

use serde::{Deserialize, Serialize};

use crate::model::{DocId, SparseVector};

/// Read access to similarity scores, however they are stored.
pub trait SimilaritySource {
    /// Number of documents (rows).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Similarity of `i` and `j`. Both must be `< len()`.
    fn score(&self, i: DocId, j: DocId) -> f32;

    /// Full row for `i`, indexed by document id.
    fn row(&self, i: DocId) -> Vec<f32> {
        (0..self.len() as DocId).map(|j| self.score(i, j)).collect()
    }
}

impl<T: SimilaritySource + ?Sized> SimilaritySource for &T {
    fn len(&self) -> usize { (**self).len() }

    fn score(&self, i: DocId, j: DocId) -> f32 { (**self).score(i, j) }

    fn row(&self, i: DocId) -> Vec<f32> { (**self).row(i) }
}

fn pair_score(vectors: &[SparseVector], i: usize, j: usize) -> f32 {
    if i == j {
        return if vectors[i].is_zero() { 0.0 } else { 1.0 };
    }
    // clamp float drift so scores stay in [-1, 1]
    vectors[i].dot(&vectors[j]).clamp(-1.0, 1.0)
}

/// Materialized N x N matrix, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    n: usize,
    values: Vec<f32>,
}

impl DenseMatrix {
    /// Computes the upper triangle once and mirrors it. O(N^2) memory.
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let mut values = vec![0.0f32; n * n];
        for i in 0..n {
            for j in i..n {
                let s = pair_score(vectors, i, j);
                values[i * n + j] = s;
                values[j * n + i] = s;
            }
        }
        Self { n, values }
    }

    /// Builds a dense copy from any source.
    pub fn from_source(source: &dyn SimilaritySource) -> Self {
        let n = source.len();
        let mut values = Vec::with_capacity(n * n);
        for i in 0..n as DocId {
            values.extend(source.row(i));
        }
        Self { n, values }
    }

    pub fn row_slice(&self, i: DocId) -> &[f32] {
        let start = i as usize * self.n;
        &self.values[start..start + self.n]
    }

    pub fn values(&self) -> &[f32] { &self.values }
}

impl SimilaritySource for DenseMatrix {
    fn len(&self) -> usize { self.n }

    fn score(&self, i: DocId, j: DocId) -> f32 {
        self.values[i as usize * self.n + j as usize]
    }

    fn row(&self, i: DocId) -> Vec<f32> { self.row_slice(i).to_vec() }
}

/// Recomputes rows from the vectors on demand. O(N * nnz) per row, no matrix kept.
pub struct LazyRows<'a> {
    vectors: &'a [SparseVector],
}

impl<'a> LazyRows<'a> {
    pub fn new(vectors: &'a [SparseVector]) -> Self { Self { vectors } }
}

impl SimilaritySource for LazyRows<'_> {
    fn len(&self) -> usize { self.vectors.len() }

    fn score(&self, i: DocId, j: DocId) -> f32 {
        pair_score(self.vectors, i as usize, j as usize)
    }
}
