//! Input validation for arPLS configuration and data.
//!
//! ## Purpose
//!
//! This module checks spectra and configuration parameters before any
//! matrix is built, so that failures are reported immediately and without
//! partial results.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * A validated spectrum has at least 3 finite samples.
//! * A validated `lambda` and `ratio` are positive and finite.
//!
//! ## Non-goals
//!
//! * This module does not transform or clean input data.

// Internal dependencies
use crate::math::difference::MIN_SAMPLES;
use crate::primitives::errors::ArplsError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for arPLS configuration and input data.
pub struct Validator;

impl Validator {
    /// Validate a spectrum: length first, then finiteness.
    pub fn validate_spectrum(y: &[f64]) -> Result<(), ArplsError> {
        if y.len() < MIN_SAMPLES {
            return Err(ArplsError::InsufficientLength {
                got: y.len(),
                min: MIN_SAMPLES,
            });
        }

        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(ArplsError::InvalidNumericValue(format!("y[{i}]={}", y[i])));
        }

        Ok(())
    }

    /// Validate the smoothness parameter.
    pub fn validate_lambda(lambda: f64) -> Result<(), ArplsError> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(ArplsError::InvalidLambda(lambda));
        }
        Ok(())
    }

    /// Validate the convergence ratio.
    pub fn validate_ratio(ratio: f64) -> Result<(), ArplsError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ArplsError::InvalidRatio(ratio));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), ArplsError> {
        if let Some(param) = duplicate_param {
            return Err(ArplsError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
