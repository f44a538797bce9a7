//! High-level API for arPLS baseline estimation.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: a fluent builder that
//! produces a validated, reusable [`ArplsModel`], and the one-shot
//! [`estimate_baseline`] function.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are checked once, when `.build()` is called.
//! * **Reproducible**: The perturbation generator is either injected per call
//!   (`fit_with_rng`) or derived from a builder seed.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create an [`ArplsBuilder`] via `Arpls::new()`.
//! 2. Chain configuration methods (`.lambda()`, `.ratio()`, etc.).
//! 3. Call `.build()` to obtain an [`ArplsModel`], then `.fit(&y)`.

// External dependencies
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Internal dependencies
use crate::engine::executor::{ArplsConfig, ArplsExecutor};
use crate::engine::validator::Validator;
use crate::primitives::input::SpectrumInput;

// Publicly re-exported types
pub use crate::engine::output::{BaselineResult, Termination};
pub use crate::primitives::backend::Backend;
pub use crate::primitives::errors::ArplsError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring arPLS parameters.
#[derive(Debug, Clone, Default)]
pub struct ArplsBuilder {
    /// Smoothness parameter (default 5e5).
    pub lambda: Option<f64>,

    /// Convergence ratio on the relative weight change (default 1e-6).
    pub ratio: Option<f64>,

    /// Soft iteration cutoff (default 50).
    pub max_iterations: Option<usize>,

    /// Log a diagnostic line when the cutoff is passed (default false).
    pub diagnostic_log: Option<bool>,

    /// Seed for the perturbation generator.
    pub seed: Option<u64>,

    /// Linear solve backend (default Sparse).
    pub backend: Option<Backend>,

    /// Include the final weights in the result.
    pub return_weights: Option<bool>,

    /// Include the baseline-corrected spectrum in the result.
    pub return_corrected: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl ArplsBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothness parameter.
    pub fn lambda(mut self, lambda: f64) -> Self {
        if self.lambda.is_some() {
            self.duplicate_param = Some("lambda");
        }
        self.lambda = Some(lambda);
        self
    }

    /// Set the convergence ratio.
    pub fn ratio(mut self, ratio: f64) -> Self {
        if self.ratio.is_some() {
            self.duplicate_param = Some("ratio");
        }
        self.ratio = Some(ratio);
        self
    }

    /// Set the soft iteration cutoff. The loop never runs more than `max_iterations + 10` times.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Enable or disable the cutoff diagnostic.
    pub fn diagnostic_log(mut self, enabled: bool) -> Self {
        if self.diagnostic_log.is_some() {
            self.duplicate_param = Some("diagnostic_log");
        }
        self.diagnostic_log = Some(enabled);
        self
    }

    /// Seed the perturbation generator for reproducible fits.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Select the linear solve backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        if self.backend.is_some() {
            self.duplicate_param = Some("backend");
        }
        self.backend = Some(backend);
        self
    }

    /// Include final weights in output.
    pub fn return_weights(mut self) -> Self {
        self.return_weights = Some(true);
        self
    }

    /// Include the baseline-corrected spectrum in output.
    pub fn return_corrected(mut self) -> Self {
        self.return_corrected = Some(true);
        self
    }

    /// Validate the configuration and create a model.
    pub fn build(self) -> Result<ArplsModel, ArplsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = ArplsConfig::default();
        let config = ArplsConfig {
            lambda: self.lambda.unwrap_or(defaults.lambda),
            ratio: self.ratio.unwrap_or(defaults.ratio),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            diagnostic_log: self.diagnostic_log.unwrap_or(defaults.diagnostic_log),
            backend: self.backend.unwrap_or(defaults.backend),
        };

        Validator::validate_lambda(config.lambda)?;
        Validator::validate_ratio(config.ratio)?;

        Ok(ArplsModel {
            config,
            seed: self.seed,
            return_weights: self.return_weights.unwrap_or(false),
            return_corrected: self.return_corrected.unwrap_or(false),
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A validated arPLS configuration, reusable across spectra.
#[derive(Debug, Clone, PartialEq)]
pub struct ArplsModel {
    config: ArplsConfig,
    seed: Option<u64>,
    return_weights: bool,
    return_corrected: bool,
}

impl ArplsModel {
    /// Configuration used for every fit.
    pub fn config(&self) -> &ArplsConfig {
        &self.config
    }

    /// Estimate the baseline of `y`.
    ///
    /// With a builder seed the perturbation generator is `StdRng::seed_from_u64(seed)`,
    /// created afresh for every call; otherwise it is seeded from the OS.
    pub fn fit<I>(&self, y: &I) -> Result<BaselineResult, ArplsError>
    where
        I: SpectrumInput + ?Sized,
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.fit_with_rng(y, &mut rng)
    }

    /// Estimate the baseline of `y`, drawing perturbation noise from `rng`.
    pub fn fit_with_rng<I, R>(&self, y: &I, rng: &mut R) -> Result<BaselineResult, ArplsError>
    where
        I: SpectrumInput + ?Sized,
        R: Rng + ?Sized,
    {
        let spectrum = y.to_spectrum()?;
        let output = ArplsExecutor::new(self.config).run(&spectrum, rng)?;

        let corrected = self.return_corrected.then(|| {
            spectrum
                .iter()
                .zip(output.baseline.iter())
                .map(|(&yi, &zi)| yi - zi)
                .collect()
        });

        Ok(BaselineResult {
            baseline: output.baseline,
            corrected,
            weights: self.return_weights.then_some(output.weights),
            iterations: output.iterations,
            convergence: output.convergence,
            termination: output.termination,
            perturbations: output.perturbations,
        })
    }
}

// ============================================================================
// One-shot Estimation
// ============================================================================

/// Estimate the baseline of a spectrum in one call.
///
/// Equivalent to building a model with the given `lambda`, `ratio`,
/// `max_iterations`, and `diagnostic_log` and returning only the baseline.
/// The usual values are `5e5`, `1e-6`, `50`, and `false`.
///
/// The degenerate-case perturbation draws from an OS-seeded generator, so two
/// calls on such a spectrum may differ slightly. For reproducible results,
/// build a model with `.seed(..)` or call [`ArplsModel::fit_with_rng`].
pub fn estimate_baseline<I>(
    y: &I,
    lambda: f64,
    ratio: f64,
    max_iterations: usize,
    diagnostic_log: bool,
) -> Result<Vec<f64>, ArplsError>
where
    I: SpectrumInput + ?Sized,
{
    ArplsBuilder::new()
        .lambda(lambda)
        .ratio(ratio)
        .max_iterations(max_iterations)
        .diagnostic_log(diagnostic_log)
        .build()?
        .fit(y)
        .map(|result| result.baseline)
}
