//! Weighted penalized linear solves.
//!
//! ## Purpose
//!
//! This module solves the symmetric system `(W + H) z = W y` that produces
//! the baseline estimate at each reweighting iteration, where `W = diag(w)`
//! and `H` is the constant penalty matrix.
//!
//! ## Design notes
//!
//! * **Trait seam**: The executor only sees [`LinearSolver`]; the matrix
//!   representation and factorization stay inside each implementation.
//! * **Sparse**: [`SparseLdlSolver`] assembles `W + H` in CSC form and factors
//!   it with `sprs-ldl`.
//! * **Banded**: [`BandedLdlSolver`] factors the pentadiagonal band directly
//!   in `O(n)` time and memory.
//!
//! ## Invariants
//!
//! * A successful solve returns exactly `n` finite values.
//! * Any factorization error or non-finite output is a `SolverFailure`.
//!
//! ## Non-goals
//!
//! * This module does not choose weights or decide convergence.

// External dependencies
use sprs::CsMat;
use sprs_ldl::Ldl;

// Internal dependencies
use crate::math::penalty::PenalizedMatrix;
use crate::primitives::backend::Backend;
use crate::primitives::errors::ArplsError;

// ============================================================================
// Solver Trait
// ============================================================================

/// Solver for the weighted penalized system `(diag(w) + H) z = diag(w) y`.
pub trait LinearSolver {
    /// Solve for the baseline given the current weights and spectrum.
    fn solve(&self, weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError>;
}

/// Create the solver implementation selected by `backend`.
pub fn solver_for(backend: Backend, penalty: &PenalizedMatrix) -> Box<dyn LinearSolver + '_> {
    match backend {
        Backend::Sparse => Box::new(SparseLdlSolver::new(penalty)),
        Backend::Banded => Box::new(BandedLdlSolver::new(penalty)),
    }
}

/// Right-hand side `W y`.
fn weighted_rhs(weights: &[f64], y: &[f64]) -> Vec<f64> {
    weights.iter().zip(y.iter()).map(|(&w, &v)| w * v).collect()
}

/// Reject baselines containing NaN or infinity.
pub fn ensure_finite(z: Vec<f64>) -> Result<Vec<f64>, ArplsError> {
    match z.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ArplsError::SolverFailure(format!(
            "non-finite baseline value {} at index {i}",
            z[i]
        ))),
        None => Ok(z),
    }
}

/// Shape and finiteness checks shared by every backend.
fn check_inputs(penalty: &PenalizedMatrix, weights: &[f64], y: &[f64]) -> Result<(), ArplsError> {
    let n = penalty.samples();
    if weights.len() != n || y.len() != n {
        return Err(ArplsError::SolverFailure(format!(
            "dimension mismatch: penalty is {n}x{n}, weights {}, spectrum {}",
            weights.len(),
            y.len()
        )));
    }
    if let Some(i) = weights.iter().position(|w| !w.is_finite()) {
        return Err(ArplsError::SolverFailure(format!(
            "non-finite weight {} at index {i}",
            weights[i]
        )));
    }
    if let Some(i) = y.iter().position(|v| !v.is_finite()) {
        return Err(ArplsError::SolverFailure(format!(
            "non-finite spectrum value {} at index {i}",
            y[i]
        )));
    }
    Ok(())
}

// ============================================================================
// Sparse LDL^T
// ============================================================================

/// General sparse solver backed by `sprs-ldl`.
#[derive(Debug, Clone, Copy)]
pub struct SparseLdlSolver<'a> {
    penalty: &'a PenalizedMatrix,
}

impl<'a> SparseLdlSolver<'a> {
    /// Wrap a penalty matrix.
    pub fn new(penalty: &'a PenalizedMatrix) -> Self {
        Self { penalty }
    }
}

impl LinearSolver for SparseLdlSolver<'_> {
    fn solve(&self, weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        check_inputs(self.penalty, weights, y)?;

        let n = weights.len();
        let diagonal = CsMat::new_csc((n, n), (0..=n).collect(), (0..n).collect(), weights.to_vec());
        let system = &diagonal + self.penalty.matrix();
        let rhs = weighted_rhs(weights, y);

        let factor = Ldl::new().numeric(system.view()).map_err(|err| {
            ArplsError::SolverFailure(format!("sparse LDL^T factorization failed: {err:?}"))
        })?;

        ensure_finite(factor.solve(rhs.as_slice()))
    }
}

// ============================================================================
// Banded LDL^T
// ============================================================================

/// Pentadiagonal solver working directly on the penalty band.
#[derive(Debug, Clone, Copy)]
pub struct BandedLdlSolver<'a> {
    penalty: &'a PenalizedMatrix,
}

impl<'a> BandedLdlSolver<'a> {
    /// Wrap a penalty matrix.
    pub fn new(penalty: &'a PenalizedMatrix) -> Self {
        Self { penalty }
    }
}

impl LinearSolver for BandedLdlSolver<'_> {
    fn solve(&self, weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        check_inputs(self.penalty, weights, y)?;

        let n = weights.len();
        let [h0, h1, h2] = self.penalty.band();

        // L is unit lower triangular with sub-diagonals l1 (offset 1) and l2 (offset 2).
        let mut d = vec![0.0; n];
        let mut l1 = vec![0.0; n];
        let mut l2 = vec![0.0; n];

        for i in 0..n {
            let mut di = h0[i] + weights[i];
            if i >= 1 {
                di -= l1[i - 1] * l1[i - 1] * d[i - 1];
            }
            if i >= 2 {
                di -= l2[i - 2] * l2[i - 2] * d[i - 2];
            }
            if !(di.is_finite() && di > 0.0) {
                return Err(ArplsError::SolverFailure(format!(
                    "banded LDL^T factorization failed: pivot {di} at row {i} is not positive"
                )));
            }
            d[i] = di;

            if i + 1 < n {
                let mut a = h1[i];
                if i >= 1 {
                    a -= l2[i - 1] * l1[i - 1] * d[i - 1];
                }
                l1[i] = a / di;
            }
            if i + 2 < n {
                l2[i] = h2[i] / di;
            }
        }

        // Forward substitution: L v = W y, then scale by D^-1.
        let mut z = weighted_rhs(weights, y);
        for i in 0..n {
            if i >= 1 {
                z[i] -= l1[i - 1] * z[i - 1];
            }
            if i >= 2 {
                z[i] -= l2[i - 2] * z[i - 2];
            }
        }
        for (zi, &di) in z.iter_mut().zip(d.iter()) {
            *zi /= di;
        }

        // Back substitution: L^T z = v.
        for i in (0..n).rev() {
            if i + 1 < n {
                z[i] -= l1[i] * z[i + 1];
            }
            if i + 2 < n {
                z[i] -= l2[i] * z[i + 2];
            }
        }

        ensure_finite(z)
    }
}
