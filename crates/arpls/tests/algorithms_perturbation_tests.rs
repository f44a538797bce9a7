//! Tests for degenerate-case perturbation.
//!
//! These tests verify the scale selection rules and that the perturbation is
//! bounded, centered in distribution, and reproducible with a seeded
//! generator.

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use arpls::internals::algorithms::perturbation::{
    PERTURBATION_DIVISOR, perturb_spectrum, perturbation_scale,
};
use arpls::internals::math::statistics::std_dev;

// ============================================================================
// Scale Tests
// ============================================================================

/// Test the scale for a spectrum with spread.
///
/// Verifies population std / 1000.
#[test]
fn test_scale_from_std() {
    let y = [1.0, 2.0, 3.0];
    let expected = (2.0f64 / 3.0).sqrt() / PERTURBATION_DIVISOR;
    assert_relative_eq!(perturbation_scale(&y), expected, epsilon = 1e-15);
}

/// Test the scale for a constant spectrum.
///
/// Verifies mean / 1000, keeping the sign of the mean.
#[test]
fn test_scale_from_mean() {
    assert_relative_eq!(perturbation_scale(&[5.0; 4]), 0.005);
    assert_relative_eq!(perturbation_scale(&[-4.0; 4]), -0.004);
}

/// Test the scale for an all-zero spectrum.
///
/// Verifies the fixed fallback 1 / 1000.
#[test]
fn test_scale_fallback() {
    assert_relative_eq!(perturbation_scale(&[0.0; 10]), 0.001);
}

// ============================================================================
// Perturbation Tests
// ============================================================================

/// Test perturbation bounds.
///
/// Verifies every change is within half the scale.
#[test]
fn test_perturbation_bounded() {
    let original: Vec<f64> = (0..500).map(|i| (i % 7) as f64).collect();
    let scale = perturbation_scale(&original);

    let mut y = original.clone();
    let mut rng = StdRng::seed_from_u64(42);
    perturb_spectrum(&mut y, &mut rng);

    let mut changed = 0;
    for (a, b) in y.iter().zip(original.iter()) {
        assert!((a - b).abs() <= 0.5 * scale);
        if a != b {
            changed += 1;
        }
    }
    assert!(changed > 490);
}

/// Test that an all-zero spectrum gains spread.
///
/// Verifies the perturbed spectrum is no longer constant.
#[test]
fn test_perturbation_breaks_constant() {
    let mut y = vec![0.0; 100];
    let mut rng = StdRng::seed_from_u64(0);
    perturb_spectrum(&mut y, &mut rng);

    let sd = std_dev(&y, 0);
    assert!(sd > 0.0);
    assert!(sd < 0.001);
    assert!(y.iter().all(|v| v.abs() <= 0.0005));
}

/// Test reproducibility with a seeded generator.
///
/// Verifies identical output for identical seeds and different output otherwise.
#[test]
fn test_perturbation_seeded() {
    let base: Vec<f64> = (0..50).map(|i| i as f64).collect();

    let mut a = base.clone();
    let mut b = base.clone();
    let mut c = base.clone();
    perturb_spectrum(&mut a, &mut StdRng::seed_from_u64(7));
    perturb_spectrum(&mut b, &mut StdRng::seed_from_u64(7));
    perturb_spectrum(&mut c, &mut StdRng::seed_from_u64(8));

    assert_eq!(a, b);
    assert_ne!(a, c);
}
