//! Tests for the reweighting loop.
//!
//! These tests verify the executor's control flow with scripted solvers and
//! its numerical behavior with the real backends:
//! - Convergence once the weights stop changing
//! - Soft cutoff and hard cap on the iteration count
//! - Degenerate-case perturbation and early stop on persistent degeneracy
//! - Propagation of solver failures
//!
//! ## Test Organization
//!
//! 1. **Scripted Solvers** - Deterministic loop control
//! 2. **Degenerate Handling** - Perturbation retry
//! 3. **Real Backends** - End-to-end runs on small spectra

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;

use arpls::internals::algorithms::solver::LinearSolver;
use arpls::internals::engine::executor::{ArplsConfig, ArplsExecutor, HARD_CAP_MARGIN};
use arpls::internals::engine::output::Termination;
use arpls::internals::primitives::backend::Backend;
use arpls::internals::primitives::errors::ArplsError;

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns `y - residual` regardless of the weights.
struct FixedResidualSolver {
    residual: Vec<f64>,
}

impl LinearSolver for FixedResidualSolver {
    fn solve(&self, _weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        Ok(y.iter().zip(self.residual.iter()).map(|(a, r)| a - r).collect())
    }
}

/// Alternates between two residual patterns so the weights never settle.
struct OscillatingSolver {
    calls: Cell<usize>,
}

impl OscillatingSolver {
    const A: [f64; 5] = [-1.0, -2.0, -3.0, 5.0, 0.0];
    const B: [f64; 5] = [-3.0, -2.0, -1.0, 0.0, 5.0];

    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl LinearSolver for OscillatingSolver {
    fn solve(&self, _weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        let residual = if call % 2 == 0 { &Self::A } else { &Self::B };
        Ok(y.iter().zip(residual.iter()).map(|(a, r)| a - r).collect())
    }
}

/// Reproduces the data exactly, so every residual is zero.
struct ExactSolver;

impl LinearSolver for ExactSolver {
    fn solve(&self, _weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        Ok(y.to_vec())
    }
}

/// Returns `y - A` on the first call and reproduces the data afterwards.
struct ExactAfterFirstSolver {
    calls: Cell<usize>,
}

impl LinearSolver for ExactAfterFirstSolver {
    fn solve(&self, _weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call == 0 {
            Ok(y.iter().zip(OscillatingSolver::A.iter()).map(|(a, r)| a - r).collect())
        } else {
            Ok(y.to_vec())
        }
    }
}

/// Produces a NaN baseline value.
struct NanSolver;

impl LinearSolver for NanSolver {
    fn solve(&self, _weights: &[f64], y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        let mut z = y.to_vec();
        z[1] = f64::NAN;
        Ok(z)
    }
}

/// Always fails.
struct FailingSolver;

impl LinearSolver for FailingSolver {
    fn solve(&self, _weights: &[f64], _y: &[f64]) -> Result<Vec<f64>, ArplsError> {
        Err(ArplsError::SolverFailure("factorization failed".to_string()))
    }
}

fn config(max_iterations: usize) -> ArplsConfig {
    ArplsConfig {
        max_iterations,
        ..ArplsConfig::default()
    }
}

// ============================================================================
// Scripted Solver Tests
// ============================================================================

/// Test convergence when the weights stop changing.
///
/// A solver that ignores the weights produces the same update twice, so the
/// second iteration has zero weight change.
#[test]
fn test_converges_when_weights_settle() {
    let solver = FixedResidualSolver {
        residual: vec![-1.0, -2.0, 0.5, 4.0, -0.5],
    };
    let y = [1.0; 5];
    let executor = ArplsExecutor::new(ArplsConfig::default());

    let out = executor
        .run_with_solver(&y, &solver, &mut StdRng::seed_from_u64(0))
        .unwrap();

    assert_eq!(out.termination, Termination::Converged);
    assert_eq!(out.iterations, 2);
    assert_relative_eq!(out.convergence, 0.0);
    assert_eq!(out.perturbations, 0);
    assert_eq!(out.spectrum, y.to_vec());
}

/// Test the soft cutoff.
///
/// Verifies the loop stops at iteration index `max_iterations + 1`.
#[test]
fn test_soft_cutoff() {
    let y = [0.0; 5];
    for max_iterations in [0, 1, 3, 20] {
        let solver = OscillatingSolver::new();
        let executor = ArplsExecutor::new(config(max_iterations));

        let out = executor
            .run_with_solver(&y, &solver, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(out.termination, Termination::IterationLimit);
        assert_eq!(out.iterations, max_iterations + 2);
        assert!(out.iterations <= max_iterations + HARD_CAP_MARGIN);
        assert_eq!(solver.calls.get(), out.iterations);
        assert!(out.convergence > 0.1);
    }
}

/// Test that the cutoff returns the last baseline.
///
/// Verifies the best-effort baseline and the weights that produced it.
#[test]
fn test_cutoff_returns_last_baseline() {
    let y = [10.0; 5];
    let solver = OscillatingSolver::new();
    let out = ArplsExecutor::new(config(0))
        .run_with_solver(&y, &solver, &mut StdRng::seed_from_u64(0))
        .unwrap();

    // Two solves: A then B.
    let expected: Vec<f64> = OscillatingSolver::B.iter().map(|r| 10.0 - r).collect();
    assert_eq!(out.baseline, expected);
    assert_eq!(out.weights.len(), 5);
    assert!(out.weights.iter().all(|w| (0.0..=1.0).contains(w)));
}

/// Test the hard cap arithmetic.
///
/// Verifies `max_iterations + 10`, saturating at the integer limit.
#[test]
fn test_hard_cap() {
    assert_eq!(config(0).hard_cap(), 10);
    assert_eq!(config(50).hard_cap(), 60);
    assert_eq!(config(usize::MAX).hard_cap(), usize::MAX);
}

/// Test the single iteration bound.
///
/// Verifies `max_iterations + 2` solves, never past the hard cap.
#[test]
fn test_iteration_limit() {
    assert_eq!(config(0).iteration_limit(), 2);
    assert_eq!(config(50).iteration_limit(), 52);
    assert_eq!(config(usize::MAX).iteration_limit(), usize::MAX);
    for max_iterations in [0, 1, 7, 50, usize::MAX - 1, usize::MAX] {
        let cfg = config(max_iterations);
        assert!(cfg.iteration_limit() <= cfg.hard_cap());
    }
}

/// Test default configuration values.
#[test]
fn test_default_config() {
    let cfg = ArplsConfig::default();
    assert_relative_eq!(cfg.lambda, 5e5);
    assert_relative_eq!(cfg.ratio, 1e-6);
    assert_eq!(cfg.max_iterations, 50);
    assert!(!cfg.diagnostic_log);
    assert_eq!(cfg.backend, Backend::Sparse);
}

/// Test solver error propagation.
///
/// Verifies the solver's error is returned unchanged.
#[test]
fn test_solver_error_propagates() {
    let err = ArplsExecutor::default()
        .run_with_solver(&[1.0, 2.0, 3.0], &FailingSolver, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert_eq!(err, ArplsError::SolverFailure("factorization failed".to_string()));
}

/// Test rejection of non-finite solves.
///
/// Verifies a NaN baseline is reported as `SolverFailure`.
#[test]
fn test_non_finite_solve_fails() {
    let err = ArplsExecutor::default()
        .run_with_solver(&[1.0, 2.0, 3.0, 4.0], &NanSolver, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert!(matches!(err, ArplsError::SolverFailure(_)));
}

// ============================================================================
// Degenerate Handling Tests
// ============================================================================

/// Test the early stop when the retry is still degenerate.
///
/// An exact solver leaves zero residuals even after perturbation, so the
/// first iteration returns the retried baseline.
#[test]
fn test_degenerate_retry_stops_with_baseline() {
    let y = [4.0, 5.0, 6.0, 7.0];
    let out = ArplsExecutor::default()
        .run_with_solver(&y, &ExactSolver, &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(out.termination, Termination::DegenerateResiduals);
    assert_eq!(out.iterations, 1);
    assert_eq!(out.perturbations, 1);
    assert!(out.convergence.is_nan());
    assert_eq!(out.baseline, out.spectrum);
    assert_ne!(out.spectrum, y.to_vec());
    assert!(out.baseline.iter().all(|v| v.is_finite()));
    assert_eq!(out.weights, vec![1.0; 4]);
}

/// Test the early stop after a regular iteration.
///
/// Verifies the weights and convergence of the last update are kept.
#[test]
fn test_degenerate_after_update_keeps_last_weights() {
    let y = [2.0; 5];
    let solver = ExactAfterFirstSolver {
        calls: Cell::new(0),
    };
    let out = ArplsExecutor::default()
        .run_with_solver(&y, &solver, &mut StdRng::seed_from_u64(2))
        .unwrap();

    assert_eq!(out.termination, Termination::DegenerateResiduals);
    assert_eq!(out.iterations, 2);
    assert_eq!(out.perturbations, 1);
    assert_eq!(solver.calls.get(), 3);
    assert!(out.convergence.is_finite() && out.convergence > 0.0);
    assert_ne!(out.weights, vec![1.0; 5]);
    assert!(out.weights.iter().all(|w| (0.0..=1.0).contains(w)));
    assert_eq!(out.baseline, out.spectrum);
}

/// Test the perturbation path on an all-zero spectrum.
///
/// Verifies a finite result, a recorded perturbation, and that the perturbed
/// spectrum replaces the input.
#[test]
fn test_all_zero_spectrum_is_perturbed() {
    let y = vec![0.0; 200];
    let out = ArplsExecutor::default()
        .run(&y, &mut StdRng::seed_from_u64(5))
        .unwrap();

    assert!(out.perturbations >= 1);
    assert_eq!(out.baseline.len(), 200);
    assert!(out.baseline.iter().all(|v| v.is_finite() && v.abs() < 1e-3));
    assert_ne!(out.spectrum, y);
    assert!(out.spectrum.iter().all(|v| v.abs() < 0.001));
}

/// Test the perturbation path on a noise-free ramp.
///
/// Verifies a finite, correctly shaped baseline close to the ramp.
#[test]
fn test_monotonic_ramp() {
    let y: Vec<f64> = (0..100).map(|i| 10.0 + 2.0 * i as f64).collect();
    let out = ArplsExecutor::default()
        .run(&y, &mut StdRng::seed_from_u64(9))
        .unwrap();

    assert_eq!(out.baseline.len(), y.len());
    assert!(out.iterations <= 60);
    for (z, v) in out.baseline.iter().zip(y.iter()) {
        assert!(z.is_finite());
        assert_relative_eq!(*z, *v, epsilon = 0.1);
    }
}

// ============================================================================
// Real Backend Tests
// ============================================================================

/// Test that both backends run the same loop.
///
/// Verifies matching baselines and iteration counts on a peaked spectrum.
#[test]
fn test_backends_match_end_to_end() {
    let y: Vec<f64> = (0..300)
        .map(|i| {
            let x = i as f64;
            5.0 + 0.01 * x + 0.05 * (x * 0.37).sin() + 40.0 * (-((x - 150.0) / 4.0).powi(2)).exp()
        })
        .collect();

    let run = |backend| {
        let cfg = ArplsConfig {
            backend,
            lambda: 1e4,
            ..ArplsConfig::default()
        };
        ArplsExecutor::new(cfg)
            .run(&y, &mut StdRng::seed_from_u64(3))
            .unwrap()
    };

    let sparse = run(Backend::Sparse);
    let banded = run(Backend::Banded);

    assert!(sparse.iterations <= 60);
    for (a, b) in sparse.baseline.iter().zip(banded.baseline.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-3);
    }
    // The peak is excluded from the baseline.
    assert!(sparse.baseline[150] < 7.0);
}

/// Test input validation inside `run`.
///
/// Verifies length and finiteness errors before any solve.
#[test]
fn test_run_validates_input() {
    let executor = ArplsExecutor::default();
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(
        executor.run(&[1.0, 2.0], &mut rng).unwrap_err(),
        ArplsError::InsufficientLength { got: 2, min: 3 }
    );
    assert!(matches!(
        executor.run(&[1.0, f64::INFINITY, 3.0], &mut rng),
        Err(ArplsError::InvalidNumericValue(_))
    ));
}
