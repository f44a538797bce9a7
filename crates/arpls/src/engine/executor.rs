//! Execution engine for arPLS baseline estimation.
//!
//! ## Purpose
//!
//! This module runs the iteratively reweighted penalized least squares loop:
//! weighted solve, residual statistics, degenerate-case retry, weight update,
//! and convergence check, until the weights settle or the iteration cutoff is
//! passed.
//!
//! ## Design notes
//!
//! * The penalty matrix is built once per run and shared by all iterations.
//! * The linear solve is injected through [`LinearSolver`], so the loop never
//!   touches a concrete matrix type.
//! * Randomness enters only through the caller-supplied `Rng`.
//! * A perturbed spectrum replaces the working spectrum for the rest of the run.
//!
//! ## Invariants
//!
//! * Weights start at one and stay in [0, 1].
//! * The loop stops as soon as `iteration > max_iterations` and never runs
//!   more than `max_iterations + 10` iterations.
//! * At most one perturbation retry per iteration. A retry that is still
//!   degenerate ends the run with the retried (finite) baseline.
//! * Every returned baseline is finite; a non-finite solve is a `SolverFailure`.
//! * At most one diagnostic log line per run.
//!
//! ## Non-goals
//!
//! * This module does not convert input containers (handled by `input`).
//! * This module does not assemble user-facing results (handled by `api`).

// External dependencies
use log::warn;
use rand::Rng;

// Internal dependencies
use crate::algorithms::perturbation::perturb_spectrum;
use crate::algorithms::solver::{LinearSolver, ensure_finite, solver_for};
use crate::algorithms::weights::{AsymmetricWeightUpdater, ResidualStatistics};
use crate::engine::output::Termination;
use crate::engine::validator::Validator;
use crate::math::difference::SecondDifferenceOperator;
use crate::math::penalty::PenalizedMatrix;
use crate::math::statistics::{l2_distance, l2_norm};
use crate::primitives::backend::Backend;
use crate::primitives::errors::ArplsError;

/// Iterations allowed past `max_iterations` before the loop is forcibly stopped.
pub const HARD_CAP_MARGIN: usize = 10;

/// Log target for diagnostics emitted by the executor.
pub const LOG_TARGET: &str = "arpls";

// ============================================================================
// Configuration
// ============================================================================

/// Validated parameters for one arPLS run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArplsConfig {
    /// Smoothness parameter; larger values give flatter baselines.
    pub lambda: f64,

    /// Convergence threshold on the relative weight change.
    pub ratio: f64,

    /// Soft iteration cutoff (`itermax`).
    pub max_iterations: usize,

    /// Emit a log line when the cutoff is passed.
    pub diagnostic_log: bool,

    /// Linear solve backend.
    pub backend: Backend,
}

impl ArplsConfig {
    /// Default smoothness parameter.
    pub const DEFAULT_LAMBDA: f64 = 5.0e5;

    /// Default convergence ratio.
    pub const DEFAULT_RATIO: f64 = 1.0e-6;

    /// Default soft iteration cutoff.
    pub const DEFAULT_MAX_ITERATIONS: usize = 50;

    /// Absolute iteration ceiling, `max_iterations + 10`.
    pub fn hard_cap(&self) -> usize {
        self.max_iterations.saturating_add(HARD_CAP_MARGIN)
    }

    /// Number of iterations after which the loop stops without convergence.
    ///
    /// The soft cutoff stops at iteration index `max_iterations + 1`, i.e. after
    /// `max_iterations + 2` solves, never beyond [`hard_cap`](Self::hard_cap).
    pub fn iteration_limit(&self) -> usize {
        self.max_iterations.saturating_add(2).min(self.hard_cap())
    }
}

impl Default for ArplsConfig {
    fn default() -> Self {
        Self {
            lambda: Self::DEFAULT_LAMBDA,
            ratio: Self::DEFAULT_RATIO,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            diagnostic_log: false,
            backend: Backend::default(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Raw output of one executor run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput {
    /// Baseline from the final iteration.
    pub baseline: Vec<f64>,

    /// Weights used for the final solve.
    pub weights: Vec<f64>,

    /// Working spectrum at the end of the run (differs from the input after a perturbation).
    pub spectrum: Vec<f64>,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Last relative weight change (`NaN` if the run ended before any weight update).
    pub convergence: f64,

    /// Why the loop stopped.
    pub termination: Termination,

    /// Iterations that took the perturbation retry.
    pub perturbations: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs the arPLS reweighting loop for a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArplsExecutor {
    config: ArplsConfig,
}

impl ArplsExecutor {
    /// Create an executor for `config`.
    pub fn new(config: ArplsConfig) -> Self {
        Self { config }
    }

    /// Configuration used by this executor.
    pub fn config(&self) -> &ArplsConfig {
        &self.config
    }

    /// Validate `y`, build the penalty, and run the loop with the configured backend.
    pub fn run<R: Rng + ?Sized>(&self, y: &[f64], rng: &mut R) -> Result<ExecutorOutput, ArplsError> {
        Validator::validate_spectrum(y)?;

        let operator = SecondDifferenceOperator::new(y.len())?;
        let penalty = PenalizedMatrix::new(&operator, self.config.lambda)?;
        let solver = solver_for(self.config.backend, &penalty);

        self.run_with_solver(y, solver.as_ref(), rng)
    }

    /// Run the loop with an explicit solver.
    pub fn run_with_solver<R: Rng + ?Sized>(
        &self,
        y: &[f64],
        solver: &dyn LinearSolver,
        rng: &mut R,
    ) -> Result<ExecutorOutput, ArplsError> {
        let n = y.len();
        let limit = self.config.iteration_limit();

        let mut spectrum = y.to_vec();
        let mut weights = vec![1.0; n];
        let mut perturbations = 0;
        let mut convergence = f64::NAN;
        let mut iteration = 0;

        loop {
            let (baseline, termination) =
                match Self::solve_step(solver, &weights, &mut spectrum, rng)? {
                    Step::Degenerate { baseline } => {
                        perturbations += 1;
                        (baseline, Some(Termination::DegenerateResiduals))
                    }
                    Step::Updated {
                        baseline,
                        stats,
                        perturbed,
                    } => {
                        if perturbed {
                            perturbations += 1;
                        }

                        let updated = AsymmetricWeightUpdater::update(&stats);
                        convergence = l2_distance(&weights, &updated) / l2_norm(&weights);

                        if convergence < self.config.ratio {
                            (baseline, Some(Termination::Converged))
                        } else if iteration + 1 >= limit {
                            if self.config.diagnostic_log {
                                warn!(
                                    target: LOG_TARGET,
                                    "surpassed max iterations: iteration {iteration}, convergence {convergence:e}"
                                );
                            }
                            (baseline, Some(Termination::IterationLimit))
                        } else {
                            weights = updated;
                            (baseline, None)
                        }
                    }
                };

            if let Some(termination) = termination {
                return Ok(ExecutorOutput {
                    baseline,
                    weights,
                    spectrum,
                    iterations: iteration + 1,
                    convergence,
                    termination,
                    perturbations,
                });
            }

            iteration += 1;
        }
    }

    /// Solve and summarize residuals, retrying once on a perturbed spectrum if degenerate.
    fn solve_step<R: Rng + ?Sized>(
        solver: &dyn LinearSolver,
        weights: &[f64],
        spectrum: &mut [f64],
        rng: &mut R,
    ) -> Result<Step, ArplsError> {
        let baseline = ensure_finite(solver.solve(weights, spectrum)?)?;
        match ResidualStatistics::compute(spectrum, &baseline) {
            Ok(stats) => Ok(Step::Updated {
                baseline,
                stats,
                perturbed: false,
            }),
            Err(ArplsError::DegenerateResidualDistribution) => {
                perturb_spectrum(spectrum, rng);
                let baseline = ensure_finite(solver.solve(weights, spectrum)?)?;
                Ok(match ResidualStatistics::compute(spectrum, &baseline) {
                    Ok(stats) => Step::Updated {
                        baseline,
                        stats,
                        perturbed: true,
                    },
                    Err(_) => Step::Degenerate { baseline },
                })
            }
            Err(err) => Err(err),
        }
    }
}

/// Outcome of one solve-and-summarize step.
enum Step {
    /// Usable statistics for the weight update.
    Updated {
        baseline: Vec<f64>,
        stats: ResidualStatistics,
        perturbed: bool,
    },

    /// Still degenerate after the perturbation retry.
    Degenerate { baseline: Vec<f64> },
}
