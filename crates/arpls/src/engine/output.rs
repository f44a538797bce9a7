//! Output types for baseline estimation.
//!
//! ## Purpose
//!
//! This module defines `BaselineResult`, which carries the estimated baseline
//! together with the optional per-sample outputs and the loop metadata of a
//! single fit.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Optional per-sample outputs use `Option<Vec<f64>>`.
//! * **Ergonomics**: Implements `Display` for a human-readable summary.
//!
//! ## Invariants
//!
//! * All populated vectors have the same length as the input spectrum.
//! * Weights are in [0, 1].
//! * `iterations` never exceeds `max_iterations + 10`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Termination
// ============================================================================

/// Reason the reweighting loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Relative weight change fell below the convergence ratio.
    Converged,

    /// The iteration cutoff was passed before convergence; the baseline is best-effort.
    IterationLimit,

    /// Residuals stayed degenerate after the perturbation retry; the baseline is
    /// the most recent finite solve.
    DegenerateResiduals,
}

impl Display for Termination {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::IterationLimit => write!(f, "iteration limit"),
            Self::DegenerateResiduals => write!(f, "degenerate residuals"),
        }
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Baseline estimate and fit metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineResult {
    /// Estimated baseline, one value per input sample.
    pub baseline: Vec<f64>,

    /// Input spectrum minus the baseline (peaks and noise).
    pub corrected: Option<Vec<f64>>,

    /// Weights that produced the returned baseline.
    pub weights: Option<Vec<f64>>,

    /// Number of solve iterations performed.
    pub iterations: usize,

    /// Last relative weight change `||w - wt|| / ||w||` (`NaN` if no weight update happened).
    pub convergence: f64,

    /// Why the loop stopped.
    pub termination: Termination,

    /// Number of iterations that needed the degenerate-case perturbation.
    pub perturbations: usize,
}

impl BaselineResult {
    /// Check whether the loop met the convergence ratio.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    /// Always false for a successful fit.
    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for BaselineResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points:  {}", self.baseline.len())?;
        writeln!(f, "  Iterations:   {}", self.iterations)?;
        writeln!(f, "  Convergence:  {:e}", self.convergence)?;
        writeln!(f, "  Termination:  {}", self.termination)?;
        if self.perturbations > 0 {
            writeln!(f, "  Perturbed:    {} iteration(s)", self.perturbations)?;
        }
        writeln!(f)?;

        writeln!(f, "Baseline:")?;

        let has_corrected = self.corrected.is_some();
        let has_weights = self.weights.is_some();

        write!(f, "{:>8} {:>14}", "Index", "Baseline")?;
        if has_corrected {
            write!(f, " {:>14}", "Corrected")?;
        }
        if has_weights {
            write!(f, " {:>10}", "Weight")?;
        }
        writeln!(f)?;

        let line_width =
            23 + if has_corrected { 15 } else { 0 } + if has_weights { 11 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Show first 10 and last 10 rows if more than 20 points
        let n = self.baseline.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8} {:>14.6}", idx, self.baseline[idx])?;
            if let Some(corrected) = &self.corrected {
                write!(f, " {:>14.6}", corrected[idx])?;
            }
            if let Some(weights) = &self.weights {
                write!(f, " {:>10.4}", weights[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
