//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the mathematical building blocks of arPLS:
//! - The sparse second-difference operator
//! - The penalized regularization matrix derived from it
//! - Residual and convergence statistics
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Second-order finite-difference operator.
pub mod difference;

/// Penalized matrix `lambda * D^T D`.
pub mod penalty;

/// Mean, standard deviation, and norms.
pub mod statistics;
