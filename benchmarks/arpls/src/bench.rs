//! arPLS benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (1K to 50K points)
//! - Smoothness parameter (lambda)
//! - Real-world scenarios (Raman, XRD, chromatography)
//! - Pathological cases (all zeros, noise-free ramp, constant offset)
//!
//! For the banded solver, use `ARPLS_BACKEND=banded cargo bench`.
//! The general sparse LDL^T solver is used otherwise.

use arpls::internals::math::penalty::PenalizedMatrix;
use arpls::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (Backend, &'static str) {
    match env::var("ARPLS_BACKEND").ok().as_deref() {
        Some("banded") => (Backend::Banded, "banded"),
        Some("sparse") | _ => (Backend::Sparse, "sparse"),
    }
}

fn build_model(backend: Backend, lambda: f64) -> ArplsModel {
    Arpls::new()
        .lambda(lambda)
        .backend(backend)
        .seed(42)
        .build()
        .unwrap()
}

fn gaussian(x: f64, center: f64, width: f64, height: f64) -> f64 {
    height * (-0.5 * ((x - center) / width).powi(2)).exp()
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Sloped baseline with a handful of narrow peaks and Gaussian noise.
fn generate_peaked_ramp(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.2).unwrap();
    let centers: Vec<f64> = (1..8).map(|k| k as f64 * size as f64 / 8.0).collect();

    (0..size)
        .map(|i| {
            let x = i as f64;
            let peaks: f64 = centers.iter().map(|&c| gaussian(x, c, 3.0, 50.0)).sum();
            10.0 + 0.01 * x + peaks + noise.sample(&mut rng)
        })
        .collect()
}

/// Raman-like spectrum: broad fluorescence background under sharp bands.
fn generate_raman(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let n = size as f64;

    (0..size)
        .map(|i| {
            let t = i as f64 / n;
            let background = 200.0 * (-2.0 * t).exp() + 50.0 * t * t;
            let bands = gaussian(t, 0.2, 0.004, 120.0)
                + gaussian(t, 0.45, 0.006, 300.0)
                + gaussian(t, 0.52, 0.003, 80.0)
                + gaussian(t, 0.8, 0.01, 150.0);
            background + bands + noise.sample(&mut rng)
        })
        .collect()
}

/// X-ray diffraction pattern: amorphous hump plus many Bragg peaks.
fn generate_xrd(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 2.0).unwrap();
    let position = Uniform::new(0.05, 0.95).unwrap();
    let n = size as f64;
    let peaks: Vec<(f64, f64)> = (0..25)
        .map(|_| (position.sample(&mut rng), rng.random_range(20.0..400.0)))
        .collect();

    (0..size)
        .map(|i| {
            let t = i as f64 / n;
            let hump = gaussian(t, 0.3, 0.15, 80.0) + 20.0;
            let bragg: f64 = peaks.iter().map(|&(c, h)| gaussian(t, c, 0.002, h)).sum();
            hump + bragg + noise.sample(&mut rng)
        })
        .collect()
}

/// Chromatogram: drifting baseline with tailing peaks.
fn generate_chromatogram(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.05).unwrap();
    let n = size as f64;

    (0..size)
        .map(|i| {
            let t = i as f64 / n;
            let drift = 1.0 + 0.5 * t + 0.3 * (3.0 * t).sin();
            let peaks = [0.15, 0.35, 0.6, 0.85]
                .iter()
                .map(|&c| {
                    let width = if t > c { 0.01 } else { 0.005 };
                    gaussian(t, c, width, 10.0)
                })
                .sum::<f64>();
            drift + peaks + noise.sample(&mut rng)
        })
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (backend, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(20);

    for size in [1_000, 5_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(size as u64));

        let y = generate_peaked_ramp(size, 42);
        let model = build_model(backend, 5e5);

        group.bench_with_input(BenchmarkId::new("fit", size), &size, |b, _| {
            b.iter(|| model.fit(black_box(&y)).unwrap())
        });
    }
    group.finish();
}

fn bench_lambda(c: &mut Criterion) {
    let (backend, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("lambda_{}", mode_name));
    group.sample_size(50);

    let y = generate_peaked_ramp(5_000, 42);

    for lambda in [1e2, 1e4, 5e5, 1e7] {
        let model = build_model(backend, lambda);
        group.bench_with_input(BenchmarkId::new("fit", lambda), &lambda, |b, _| {
            b.iter(|| model.fit(black_box(&y)).unwrap())
        });
    }
    group.finish();
}

fn bench_penalty(c: &mut Criterion) {
    let mut group = c.benchmark_group("penalty");
    group.sample_size(50);

    for size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &size, |b, &size| {
            b.iter(|| PenalizedMatrix::for_samples(black_box(size), 5e5).unwrap())
        });
    }
    group.finish();
}

fn bench_scientific(c: &mut Criterion) {
    let (backend, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scientific_{}", mode_name));
    group.sample_size(50);

    let size = 4_096;
    let cases = [
        ("raman", generate_raman(size, 1), 1e6),
        ("xrd", generate_xrd(size, 2), 1e5),
        ("chromatography", generate_chromatogram(size, 3), 1e7),
    ];

    for (name, y, lambda) in cases.iter() {
        let model = build_model(backend, *lambda);
        group.bench_function(*name, |b| b.iter(|| model.fit(black_box(y)).unwrap()));
    }
    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let (backend, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("pathological_{}", mode_name));
    group.sample_size(50);

    let size = 5_000;
    let model = build_model(backend, 5e5);

    // Every iteration starts degenerate until the spectrum is perturbed.
    let zeros = vec![0.0; size];
    group.bench_function("all_zeros", |b| {
        b.iter(|| model.fit(black_box(&zeros)).unwrap())
    });

    let ramp: Vec<f64> = (0..size).map(|i| 10.0 + 2.0 * i as f64).collect();
    group.bench_function("noise_free_ramp", |b| {
        b.iter(|| model.fit(black_box(&ramp)).unwrap())
    });

    let mut rng = StdRng::seed_from_u64(7);
    let offset: Vec<f64> = (0..size)
        .map(|_| 99.0 + rng.random_range(-0.25..0.25))
        .collect();
    group.bench_function("constant_offset", |b| {
        b.iter(|| model.fit(black_box(&offset)).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_lambda,
    bench_penalty,
    bench_scientific,
    bench_pathological,
);
criterion_main!(benches);
