//! Second-order finite-difference operator.
//!
//! ## Purpose
//!
//! This module builds the sparse `(n - 2) x n` operator `D` whose rows apply
//! the discrete second derivative `[1, -2, 1]` to consecutive samples. Its
//! Gram matrix `D^T D` is the roughness penalty of the baseline.
//!
//! ## Design notes
//!
//! * **Sparse**: Assembled from triplets and stored in CSC form (`sprs`).
//! * **Pure**: A function of `n` only; the same `n` always yields the same operator.
//!
//! ## Invariants
//!
//! * Row `i` holds exactly `1, -2, 1` at columns `i, i + 1, i + 2`.
//! * Requires `n >= 3`.

// External dependencies
use sprs::{CsMat, TriMat};

// Internal dependencies
use crate::primitives::errors::ArplsError;

/// Stencil of the discrete second derivative.
pub const SECOND_DIFFERENCE_STENCIL: [f64; 3] = [1.0, -2.0, 1.0];

/// Smallest spectrum length with at least one second difference.
pub const MIN_SAMPLES: usize = 3;

/// Sparse second-difference operator.
#[derive(Debug, Clone)]
pub struct SecondDifferenceOperator {
    matrix: CsMat<f64>,
    samples: usize,
}

impl SecondDifferenceOperator {
    /// Build the operator for a spectrum of `n` samples.
    pub fn new(n: usize) -> Result<Self, ArplsError> {
        if n < MIN_SAMPLES {
            return Err(ArplsError::InsufficientLength {
                got: n,
                min: MIN_SAMPLES,
            });
        }

        let rows = n - 2;
        let mut triplets = TriMat::with_capacity((rows, n), SECOND_DIFFERENCE_STENCIL.len() * rows);
        for row in 0..rows {
            for (offset, &coeff) in SECOND_DIFFERENCE_STENCIL.iter().enumerate() {
                triplets.add_triplet(row, row + offset, coeff);
            }
        }

        Ok(Self {
            matrix: triplets.to_csc(),
            samples: n,
        })
    }

    /// Number of samples (columns) the operator acts on.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Underlying sparse matrix.
    pub fn matrix(&self) -> &CsMat<f64> {
        &self.matrix
    }
}
