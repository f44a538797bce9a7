//! # arPLS: Baseline Estimation for 1D Spectra
//!
//! Asymmetrically reweighted penalized least squares (arPLS) estimates the
//! smooth, slowly varying background of a spectrum that also carries sharp
//! peaks and noise. Subtracting the baseline isolates the peaks.
//!
//! ## What is arPLS?
//!
//! arPLS fits a Whittaker smoother `z` to the data `y` by minimizing
//! `(y - z)^T W (y - z) + lambda * |D z|^2`, where `D` is the second-difference
//! operator. The weights `W` are updated each iteration with a logistic
//! function of the residuals: points far above the baseline (peaks) are
//! driven toward zero weight, points at or below it toward one. The loop stops
//! when the weights stop changing.
//!
//! ## Quick Start
//!
//! ```rust
//! use arpls::prelude::*;
//!
//! let y: Vec<f64> = (0..200)
//!     .map(|i| {
//!         let x = i as f64;
//!         10.0 + 0.05 * x + 50.0 * (-((x - 100.0) / 3.0).powi(2)).exp()
//!     })
//!     .collect();
//!
//! let model = Arpls::new()
//!     .lambda(1e4)
//!     .seed(7)
//!     .return_corrected()
//!     .build()?;
//!
//! let result = model.fit(&y)?;
//! assert_eq!(result.baseline.len(), y.len());
//! println!("{}", result);
//! # Result::<(), ArplsError>::Ok(())
//! ```
//!
//! ### One-shot
//!
//! ```rust
//! use arpls::prelude::*;
//!
//! let y: Vec<f64> = (0..100).map(|i| 2.0 + 0.1 * (i as f64 * 1.7).sin()).collect();
//! let baseline = estimate_baseline(&y, 5e5, 1e-6, 50, false)?;
//! assert_eq!(baseline.len(), y.len());
//! # Result::<(), ArplsError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns `Result<BaselineResult, ArplsError>`. Spectra shorter than
//! three samples fail with `InsufficientLength`; a weighted system that
//! cannot be solved to a finite baseline fails with `SolverFailure`. Running
//! past the iteration cutoff is not an error: the best-effort baseline is
//! returned with `Termination::IterationLimit`. Likewise, residuals that stay
//! degenerate after the perturbation retry end the loop with the last finite
//! baseline and `Termination::DegenerateResiduals`.
//!
//! ## Reproducibility
//!
//! A spectrum whose residuals have no negative part (for example an
//! all-zero spectrum) is perturbed with tiny uniform noise before the solve
//! is retried. Use `.seed(..)` on the builder or `fit_with_rng` to make
//! that noise deterministic.
//!
//! ## References
//!
//! - Baek, S.-J., Park, A., Ahn, Y.-J., Choo, J. (2015). "Baseline correction
//!   using asymmetrically reweighted penalized least squares smoothing."
//!   Analyst 140, 250-257.

// Layer 1: Primitives - errors, inputs, backend selection.
mod primitives;

// Layer 2: Math - difference operator, penalty matrix, statistics.
mod math;

// Layer 3: Algorithms - solves, weight update, perturbation.
mod algorithms;

// Layer 4: Engine - reweighting loop and validation.
mod engine;

// High-level fluent API.
mod api;

// Standard arPLS prelude.
pub mod prelude {
    pub use crate::api::{
        ArplsBuilder as Arpls, ArplsError, ArplsModel, Backend, BaselineResult, Termination,
        estimate_baseline,
    };
    pub use crate::primitives::input::SpectrumInput;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules so integration tests and
// benchmarks can exercise individual layers.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
