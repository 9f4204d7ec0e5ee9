//! Flat inner-product vector store.
//!
//! Row `i` is the vector of the title at ordinal position `i`. Vectors are
//! L2-normalized before insertion, so inner product equals cosine similarity
//! and a full scan returns exact (not approximate) nearest neighbors.

use std::cmp::Ordering;

use crate::constants::DimValidationError;

use super::error::IndexResult;

/// Dense row-major `f32` matrix with brute-force inner-product search.
#[derive(Debug, Clone)]
pub struct FlatVectorStore {
    dim: usize,
    data: Vec<f32>,
}

impl FlatVectorStore {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            data: Vec::new(),
        }
    }

    /// Rebuilds a store from snapshot data. The caller guarantees
    /// `data.len()` is a multiple of `dim`.
    pub(crate) fn from_parts(dim: usize, data: Vec<f32>) -> Self {
        debug_assert!(dim > 0 && data.len() % dim == 0);
        Self { dim, data }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends one row. The row ordinal is the store's previous length.
    pub fn push(&mut self, vector: &[f32]) -> IndexResult<()> {
        if vector.len() != self.dim {
            return Err(DimValidationError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            }
            .into());
        }
        self.data.extend_from_slice(vector);
        Ok(())
    }

    /// Returns up to `k` `(ordinal, inner_product)` pairs, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        if self.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .data
            .chunks_exact(self.dim)
            .map(|row| dot(query, row))
            .enumerate()
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scales `v` to unit L2 norm in place. A zero vector is left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
