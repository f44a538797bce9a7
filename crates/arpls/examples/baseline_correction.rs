//! arPLS Baseline Correction Examples
//!
//! This example demonstrates typical baseline-correction scenarios:
//! - Removing a sloped background from a peaked spectrum
//! - Choosing the smoothness parameter (lambda)
//! - Inspecting weights and the corrected spectrum
//! - Degenerate inputs that trigger the perturbation path
//! - Integer and ndarray inputs
//! - Comparing the sparse and banded solvers
//!
//! Each scenario prints a short report; exact values depend on the data.

use arpls::prelude::*;
use ndarray::Array1;
use std::time::Instant;

fn main() -> Result<(), ArplsError> {
    println!("{}", "=".repeat(80));
    println!("arPLS Baseline Correction - Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_sloped_background()?;
    example_2_lambda_comparison()?;
    example_3_weights_and_corrected()?;
    example_4_degenerate_inputs()?;
    example_5_input_types()?;
    example_6_backend_comparison()?;

    Ok(())
}

/// Synthetic spectrum: `10 + 2x` ramp, three Gaussian peaks, small ripple.
fn synthetic_spectrum(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let peaks = 80.0 * (-0.5 * (x - 100.0).powi(2)).exp()
                + 40.0 * (-0.5 * ((x - 300.0) / 3.0).powi(2)).exp()
                + 40.0 * (-0.5 * ((x - 750.0) / 5.0).powi(2)).exp();
            10.0 + 2.0 * x + peaks + 0.1 * (x * 1.3).sin()
        })
        .collect()
}

/// Example 1: Sloped Background
/// Demonstrates the basic fit and the recovered line
fn example_1_sloped_background() -> Result<(), ArplsError> {
    println!("Example 1: Sloped Background");
    println!("{}", "-".repeat(80));

    let y = synthetic_spectrum(1000);
    let result = Arpls::new().seed(1).build()?.fit(&y)?;

    let n = result.len() as f64;
    let slope = (result.baseline[999] - result.baseline[0]) / (n - 1.0);
    println!("Points:       {}", result.len());
    println!("Iterations:   {}", result.iterations);
    println!("Termination:  {}", result.termination);
    println!("Baseline[0]:  {:.3} (true 10.0)", result.baseline[0]);
    println!("Mean slope:   {:.4} (true 2.0)", slope);
    println!();

    Ok(())
}

/// Example 2: Lambda Comparison
/// Larger lambda gives a stiffer baseline
fn example_2_lambda_comparison() -> Result<(), ArplsError> {
    println!("Example 2: Lambda Comparison");
    println!("{}", "-".repeat(80));

    let y = synthetic_spectrum(1000);
    println!("{:>10} {:>12} {:>16}", "lambda", "iterations", "baseline@peak");
    for lambda in [1e2, 1e4, 5e5, 1e7] {
        let result = Arpls::new().lambda(lambda).seed(1).build()?.fit(&y)?;
        println!(
            "{:>10.0e} {:>12} {:>16.3}",
            lambda, result.iterations, result.baseline[300]
        );
    }
    println!("True baseline at x=300: {:.3}", 10.0 + 2.0 * 300.0);
    println!();

    Ok(())
}

/// Example 3: Weights and Corrected Spectrum
/// Peaks end up with near-zero weight
fn example_3_weights_and_corrected() -> Result<(), ArplsError> {
    println!("Example 3: Weights and Corrected Spectrum");
    println!("{}", "-".repeat(80));

    let y = synthetic_spectrum(1000);
    let result = Arpls::new()
        .seed(1)
        .return_weights()
        .return_corrected()
        .build()?
        .fit(&y)?;

    if let (Some(weights), Some(corrected)) = (&result.weights, &result.corrected) {
        let peak_samples = weights.iter().filter(|&&w| w < 0.5).count();
        println!("Samples treated as peak (w < 0.5): {}", peak_samples);
        println!("Corrected height at x=100: {:.3}", corrected[100]);
        println!("Corrected height at x=750: {:.3}", corrected[750]);
    }
    println!();
    println!("{}", result);

    Ok(())
}

/// Example 4: Degenerate Inputs
/// Spectra without negative residuals are perturbed and still fitted
fn example_4_degenerate_inputs() -> Result<(), ArplsError> {
    println!("Example 4: Degenerate Inputs");
    println!("{}", "-".repeat(80));

    let model = Arpls::new().seed(3).diagnostic_log(true).build()?;

    let zeros = vec![0.0; 500];
    let result = model.fit(&zeros)?;
    println!(
        "All zeros:       perturbed {} time(s), max |z| = {:.2e}",
        result.perturbations,
        result.baseline.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    );

    let ramp: Vec<f64> = (0..500).map(|i| 10.0 + 2.0 * i as f64).collect();
    let result = model.fit(&ramp)?;
    println!(
        "Noise-free ramp: perturbed {} time(s), {} after {} iterations",
        result.perturbations, result.termination, result.iterations
    );

    match model.fit(&[1.0, 2.0]) {
        Ok(_) => println!("Two samples: unexpectedly fitted"),
        Err(err) => println!("Two samples:     {}", err),
    }
    println!();

    Ok(())
}

/// Example 5: Input Types
/// Integer counts and ndarray inputs produce f64 baselines
fn example_5_input_types() -> Result<(), ArplsError> {
    println!("Example 5: Input Types");
    println!("{}", "-".repeat(80));

    let counts: Vec<u32> = (0..400)
        .map(|i| 500 + i / 4 + if (190..210).contains(&i) { 300 } else { 0 } + (i % 3))
        .collect();
    let model = Arpls::new().seed(5).build()?;

    let from_counts = model.fit(&counts)?;
    let as_array = Array1::from(counts.iter().map(|&c| c as f64).collect::<Vec<_>>());
    let from_array = model.fit(&as_array)?;

    println!("Baseline at x=200 (u32 input):    {:.3}", from_counts.baseline[200]);
    println!("Baseline at x=200 (Array1 input): {:.3}", from_array.baseline[200]);
    println!(
        "Identical: {}",
        from_counts.baseline == from_array.baseline
    );
    println!();

    Ok(())
}

/// Example 6: Backend Comparison
/// The banded solver avoids general sparse factorization
fn example_6_backend_comparison() -> Result<(), ArplsError> {
    println!("Example 6: Backend Comparison");
    println!("{}", "-".repeat(80));

    let y = synthetic_spectrum(20_000);
    for backend in [Backend::Sparse, Backend::Banded] {
        let model = Arpls::new().backend(backend).seed(1).build()?;
        let start = Instant::now();
        let result = model.fit(&y)?;
        println!(
            "{:?}: {} iterations in {:.2?} (baseline[10000] = {:.3})",
            backend,
            result.iterations,
            start.elapsed(),
            result.baseline[10_000]
        );
    }
    println!();

    Ok(())
}
