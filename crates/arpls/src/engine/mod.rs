//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates baseline estimation by coordinating the math
//! building blocks and the numerical algorithms. It owns the reweighting
//! loop, its stopping rules, and input validation.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Reweighting loop and its configuration.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types.
pub mod output;
