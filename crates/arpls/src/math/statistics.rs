//! Summary statistics for residuals and spectra.
//!
//! Small, allocation-free reductions used by the weight update, the
//! degenerate-case perturbation, and the convergence check.
//!
//! Empty inputs yield `NaN` for the mean and standard deviations, matching
//! the usual "undefined statistic" convention; callers test for finiteness.

// External dependencies
use num_traits::Float;

/// Arithmetic mean, `NaN` when empty.
#[inline]
pub fn mean<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::nan();
    }
    let n = T::from(vals.len()).unwrap_or(T::one());
    vals.iter().fold(T::zero(), |acc, &v| acc + v) / n
}

/// Standard deviation with `ddof` degrees of freedom removed from the denominator.
///
/// `ddof = 0` is the population deviation, `ddof = 1` the sample deviation.
/// Returns `NaN` when `vals.len() <= ddof`.
#[inline]
pub fn std_dev<T: Float>(vals: &[T], ddof: usize) -> T {
    if vals.len() <= ddof {
        return T::nan();
    }
    let m = mean(vals);
    let ss = vals.iter().fold(T::zero(), |acc, &v| {
        let dv = v - m;
        acc + dv * dv
    });
    let denom = T::from(vals.len() - ddof).unwrap_or(T::one());
    (ss / denom).sqrt()
}

/// Euclidean norm.
#[inline]
pub fn l2_norm<T: Float>(vals: &[T]) -> T {
    vals.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt()
}

/// Euclidean norm of the element-wise difference `a - b`.
#[inline]
pub fn l2_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| {
            let d = x - y;
            acc + d * d
        })
        .sqrt()
}
