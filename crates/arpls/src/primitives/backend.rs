//! Linear solve backend selection.
//!
//! ## Purpose
//!
//! This module defines the `Backend` enum used to pick which implementation
//! solves the weighted penalized system `(W + H) z = W y` at each iteration.
//!
//! ## Key concepts
//!
//! * **Sparse**: General sparse symmetric LDL^T factorization (`sprs-ldl`).
//! * **Banded**: Direct LDL^T on the pentadiagonal band of `W + H`.
//!
//! ## Invariants
//!
//! * The default backend is always `Sparse`.
//! * Both backends solve the same system and agree to rounding error.

/// Backend used for the weighted penalized linear solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Sparse LDL^T factorization of the assembled CSC matrix.
    #[default]
    Sparse,

    /// Banded LDL^T factorization exploiting the bandwidth of the second-difference penalty.
    Banded,
}
