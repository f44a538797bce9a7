//! Layer 3: Algorithms
//!
//! This layer implements the numerical steps of arPLS: the weighted
//! penalized solve, the asymmetric weight update, and the degenerate-case
//! perturbation. The iteration loop that sequences them lives in the engine.

// Weighted penalized linear solves.
pub mod solver;

// Asymmetric logistic reweighting.
pub mod weights;

// Perturbation for degenerate residual distributions.
pub mod perturbation;
