//! Degenerate-case perturbation of the working spectrum.
//!
//! When the residuals of a solve have no usable negative part, the spectrum
//! is nudged with small uniform noise so the next solve yields a residual
//! distribution with spread. The noise amplitude follows the data scale:
//!
//! | Condition            | Scale         |
//! |----------------------|---------------|
//! | `std(y) != 0`        | `std(y)/1000` |
//! | else `mean(y) != 0`  | `mean(y)/1000`|
//! | else                 | `1/1000`      |
//!
//! `std` is the population standard deviation. Each sample receives
//! `(u - 0.5) * scale` with `u` uniform on `[0, 1)`.

// External dependencies
use rand::Rng;

// Internal dependencies
use crate::math::statistics::{mean, std_dev};

/// Divisor applied to the data scale to size the perturbation.
pub const PERTURBATION_DIVISOR: f64 = 1000.0;

/// Amplitude of the perturbation for a spectrum.
pub fn perturbation_scale(y: &[f64]) -> f64 {
    let sd = std_dev(y, 0);
    if sd != 0.0 && sd.is_finite() {
        return sd / PERTURBATION_DIVISOR;
    }
    let m = mean(y);
    if m != 0.0 && m.is_finite() {
        return m / PERTURBATION_DIVISOR;
    }
    1.0 / PERTURBATION_DIVISOR
}

/// Add centered uniform noise to `y` in place.
pub fn perturb_spectrum<R: Rng + ?Sized>(y: &mut [f64], rng: &mut R) {
    let scale = perturbation_scale(y);
    for v in y.iter_mut() {
        *v += (rng.random::<f64>() - 0.5) * scale;
    }
}
