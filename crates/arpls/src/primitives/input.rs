//! Input abstractions for baseline estimation.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for spectrum inputs, allowing
//! `fit` to accept slices, vectors, fixed-size arrays, and ndarray vectors of
//! any primitive numeric element type through a single interface.
//!
//! ## Design notes
//!
//! * **Always f64**: Every container is copied into an owned `Vec<f64>`; the
//!   solver mutates its working copy (perturbation) and never touches the caller's data.
//! * **Layout-agnostic**: Non-contiguous ndarray views are accepted and read
//!   in logical order.
//!
//! ## Invariants
//!
//! * The returned vector has exactly as many elements as the input container, in order.
//! * An element that cannot be represented as `f64` is an error, never silently dropped.
//!
//! ## Non-goals
//!
//! * This module does not check lengths or finiteness (handled by `validator`).

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::ToPrimitive;

// Internal dependencies
use crate::primitives::errors::ArplsError;

/// Trait for ordered numeric containers that can be used as a spectrum.
pub trait SpectrumInput {
    /// Copy the samples into a floating point working vector.
    fn to_spectrum(&self) -> Result<Vec<f64>, ArplsError>;
}

fn collect_f64<'a, T, I>(values: I) -> Result<Vec<f64>, ArplsError>
where
    T: ToPrimitive + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.to_f64().ok_or_else(|| {
                ArplsError::InvalidNumericValue(format!("y[{i}] is not representable as f64"))
            })
        })
        .collect()
}

impl<T: ToPrimitive> SpectrumInput for [T] {
    fn to_spectrum(&self) -> Result<Vec<f64>, ArplsError> {
        collect_f64(self)
    }
}

impl<T: ToPrimitive> SpectrumInput for Vec<T> {
    fn to_spectrum(&self) -> Result<Vec<f64>, ArplsError> {
        collect_f64(self.as_slice())
    }
}

impl<T: ToPrimitive, const N: usize> SpectrumInput for [T; N] {
    fn to_spectrum(&self) -> Result<Vec<f64>, ArplsError> {
        collect_f64(self.as_slice())
    }
}

impl<T, S> SpectrumInput for ArrayBase<S, Ix1>
where
    T: ToPrimitive,
    S: Data<Elem = T>,
{
    fn to_spectrum(&self) -> Result<Vec<f64>, ArplsError> {
        collect_f64(self.iter())
    }
}
