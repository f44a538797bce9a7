//! Penalized (regularization) matrix construction.
//!
//! ## Purpose
//!
//! This module derives the constant penalty `H = lambda * D^T D` from the
//! second-difference operator. `H` is built once per fit and shared by every
//! iteration of the reweighting loop.
//!
//! ## Design notes
//!
//! * **Delegated products**: The transpose product and scaling run through `sprs`.
//! * **Dual storage**: Besides the CSC matrix, the upper band of `H` is kept
//!   for banded solvers. A second-difference penalty has bandwidth 2.
//!
//! ## Invariants
//!
//! * `H` is `n x n`, symmetric, and positive semi-definite.
//! * `band()[k][i] == H[i, i + k]` for `k` in `0..=2`.
//!
//! ## Non-goals
//!
//! * This module does not add the data-fidelity weights (done per iteration by the solver).

// External dependencies
use sprs::CsMat;

// Internal dependencies
use crate::math::difference::SecondDifferenceOperator;
use crate::primitives::errors::ArplsError;

/// Number of stored diagonals (main + two super-diagonals).
pub const PENALTY_BANDS: usize = 3;

/// Constant regularization matrix `lambda * D^T D`.
#[derive(Debug, Clone)]
pub struct PenalizedMatrix {
    matrix: CsMat<f64>,
    band: [Vec<f64>; PENALTY_BANDS],
    lambda: f64,
}

impl PenalizedMatrix {
    /// Build `lambda * D^T D` from an operator.
    pub fn new(operator: &SecondDifferenceOperator, lambda: f64) -> Result<Self, ArplsError> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(ArplsError::InvalidLambda(lambda));
        }

        let d = operator.matrix();
        let dt = d.transpose_view().to_owned();
        let gram = &dt * d;
        let matrix = gram.map(|&v| v * lambda).to_csc();

        let n = operator.samples();
        let mut band: [Vec<f64>; PENALTY_BANDS] = core::array::from_fn(|_| vec![0.0; n]);
        for (&value, (row, col)) in matrix.iter() {
            if col < row {
                continue;
            }
            if let Some(diagonal) = band.get_mut(col - row) {
                diagonal[row] = value;
            }
        }

        Ok(Self {
            matrix,
            band,
            lambda,
        })
    }

    /// Convenience constructor building the operator from the sample count.
    pub fn for_samples(n: usize, lambda: f64) -> Result<Self, ArplsError> {
        let operator = SecondDifferenceOperator::new(n)?;
        Self::new(&operator, lambda)
    }

    /// Sparse CSC representation of `H`.
    pub fn matrix(&self) -> &CsMat<f64> {
        &self.matrix
    }

    /// Upper band of `H`; entry `[k][i]` is `H[i, i + k]`.
    pub fn band(&self) -> &[Vec<f64>; PENALTY_BANDS] {
        &self.band
    }

    /// Smoothness parameter used to scale the penalty.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Dimension `n` of the square matrix.
    pub fn samples(&self) -> usize {
        self.band[0].len()
    }
}
