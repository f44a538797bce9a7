//! Asymmetric weight computation for baseline reweighting.
//!
//! ## Purpose
//!
//! This module implements the arPLS weight update. After each solve, the
//! residuals `d = y - z` are summarized by the statistics of their negative
//! part, and every sample is reweighted with a logistic curve centered on an
//! asymmetric threshold.
//!
//! ## Design notes
//!
//! * **Negative part only**: Points below the baseline are treated as noise,
//!   so only they define the location `m` and spread `s`.
//! * **Degenerate detection**: When the negative part is empty or its mean or
//!   sample deviation is not finite, the statistics step reports
//!   `DegenerateResidualDistribution` instead of emitting `NaN` weights.
//! * **Zero spread**: With `s = 0` the logistic collapses to a step at the
//!   threshold (1 below, 0 above, 1/2 exactly on it).
//!
//! ## Key concepts
//!
//! * **Threshold**: `2s - m`; residuals well above it are peaks.
//! * **Logistic weight**: `1 / (1 + exp(2 (d - (2s - m)) / s))`.
//!
//! ## Invariants
//!
//! * Weights are in [0, 1]; exponent overflow saturates to 0.
//! * `s` is the sample standard deviation (denominator `len - 1`).
//!
//! ## Non-goals
//!
//! * This module does not perturb the spectrum (see `perturbation`).
//! * This module does not decide convergence.

// Internal dependencies
use crate::math::statistics::{mean, std_dev};
use crate::primitives::errors::ArplsError;

// ============================================================================
// Residual Statistics
// ============================================================================

/// Residuals of one solve and the statistics of their negative part.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualStatistics {
    /// Residuals `y - z`.
    pub residuals: Vec<f64>,

    /// Mean of the negative residuals (`m`).
    pub negative_mean: f64,

    /// Sample standard deviation of the negative residuals (`s`).
    pub negative_std: f64,

    /// Number of negative residuals.
    pub negative_count: usize,
}

impl ResidualStatistics {
    /// Compute residuals and negative-part statistics.
    pub fn compute(y: &[f64], baseline: &[f64]) -> Result<Self, ArplsError> {
        let residuals: Vec<f64> = y
            .iter()
            .zip(baseline.iter())
            .map(|(&yi, &zi)| yi - zi)
            .collect();

        let negative: Vec<f64> = residuals.iter().copied().filter(|&d| d < 0.0).collect();
        let negative_mean = mean(&negative);
        let negative_std = std_dev(&negative, 1);

        if negative.is_empty() || !negative_mean.is_finite() || !negative_std.is_finite() {
            return Err(ArplsError::DegenerateResidualDistribution);
        }

        Ok(Self {
            residuals,
            negative_mean,
            negative_std,
            negative_count: negative.len(),
        })
    }

    /// Asymmetric threshold `2s - m` at which the weight is one half.
    pub fn threshold(&self) -> f64 {
        2.0 * self.negative_std - self.negative_mean
    }
}

// ============================================================================
// Weight Update
// ============================================================================

/// Logistic reweighting of residuals around the asymmetric threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsymmetricWeightUpdater;

impl AsymmetricWeightUpdater {
    /// Weight of a single residual.
    ///
    /// # Formula
    ///
    /// w = 1 / (1 + exp(2 (d - t) / s)),  t = 2s - m
    #[inline]
    pub fn logistic_weight(residual: f64, threshold: f64, scale: f64) -> f64 {
        let arg = 2.0 * (residual - threshold) / scale;
        if arg.is_nan() {
            // 0 / 0: residual sits exactly on a zero-width threshold
            return 0.5;
        }
        1.0 / (1.0 + arg.exp())
    }

    /// Compute updated weights for every residual.
    pub fn update(stats: &ResidualStatistics) -> Vec<f64> {
        let threshold = stats.threshold();
        let scale = stats.negative_std;
        stats
            .residuals
            .iter()
            .map(|&d| Self::logistic_weight(d, threshold, scale))
            .collect()
    }
}
