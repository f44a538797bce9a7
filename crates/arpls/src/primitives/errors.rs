//! Error types for arPLS baseline estimation.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while estimating
//! a baseline, including input validation, parameter constraints, and
//! numerical failures of the weighted linear solve.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. minimum lengths).
//! * **Deferred**: Builder misuse is recorded during configuration and reported by `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Too-short spectra, non-finite or unconvertible samples.
//! 2. **Parameter validation**: Non-positive smoothness or convergence ratio.
//! 3. **Numerical failure**: Factorization errors or non-finite baselines.
//! 4. **Degenerate residuals**: Reported by the statistics step and absorbed by
//!    a single perturbation retry in the executor.
//!
//! ## Invariants
//!
//! * `DegenerateResidualDistribution` never escapes a successful `fit`; if the
//!   retry cannot resolve it, the caller sees `SolverFailure`.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for arPLS operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ArplsError {
    /// The spectrum is too short for a second-difference penalty.
    InsufficientLength {
        /// Number of samples provided.
        got: usize,
        /// Minimum required samples.
        min: usize,
    },

    /// The weighted penalized system could not be solved to a finite baseline.
    SolverFailure(String),

    /// No residual is negative, or the negative residuals have no usable spread.
    DegenerateResidualDistribution,

    /// Smoothness parameter must be positive and finite.
    InvalidLambda(f64),

    /// Convergence ratio must be positive and finite.
    InvalidRatio(f64),

    /// Input data contains NaN, infinite, or unconvertible values.
    InvalidNumericValue(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for ArplsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InsufficientLength { got, min } => {
                write!(f, "Insufficient length: got {got} samples, need at least {min}")
            }
            Self::SolverFailure(msg) => write!(f, "Solver failure: {msg}"),
            Self::DegenerateResidualDistribution => {
                write!(f, "Degenerate residual distribution: no usable negative residuals")
            }
            Self::InvalidLambda(lambda) => {
                write!(f, "Invalid lambda: {lambda} (must be > 0 and finite)")
            }
            Self::InvalidRatio(ratio) => {
                write!(f, "Invalid ratio: {ratio} (must be > 0 and finite)")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for ArplsError {}
