//! Benchmarks for tessera operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tessera_color::{Hsi, Hsl, Hsv};
use tessera_core::{Color, Dimension, Raster, TileStyle, Workers};
use tessera_ops::composite::blend;
use tessera_ops::filter::{gaussian, sharpen};
use tessera_ops::pixelate::{hxl, pixelate, pxl, vxl};
use tessera_ops::{BlendMode, EdgePolicy, TriangleMode, VxlOptions};

const SIZES: [u32; 3] = [128, 512, 1024];

/// Random opaque-ish raster with a fixed seed.
fn noise(size: u32, seed: u64) -> Raster {
    let mut rng = StdRng::seed_from_u64(seed);
    let bytes: Vec<u8> = (0..size * size * 4).map(|_| rng.r#gen()).collect();
    Raster::from_rgba8(size, size, bytes).unwrap()
}

/// Benchmark the color model conversions.
fn bench_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("models");
    let colors: Vec<Color> = noise(100, 1).into_pixels();
    group.throughput(Throughput::Elements(colors.len() as u64));

    group.bench_function("hsl_roundtrip", |b| {
        b.iter(|| colors.iter().map(|&c| Hsl::from(black_box(c)).to_color()).collect::<Vec<_>>())
    });
    group.bench_function("hsv_roundtrip", |b| {
        b.iter(|| colors.iter().map(|&c| Hsv::from(black_box(c)).to_color()).collect::<Vec<_>>())
    });
    group.bench_function("hsi_roundtrip", |b| {
        b.iter(|| colors.iter().map(|&c| Hsi::from(black_box(c)).to_color()).collect::<Vec<_>>())
    });

    group.finish();
}

/// Benchmark blending across modes and sizes.
fn bench_blend(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend");

    for size in SIZES {
        let base = noise(size, 2);
        let layer = noise(size, 3);
        group.throughput(Throughput::Elements((size * size) as u64));

        for mode in [BlendMode::Normal, BlendMode::Multiply, BlendMode::SoftLight, BlendMode::Hue] {
            group.bench_with_input(BenchmarkId::new(mode.name(), size), &size, |b, _| {
                b.iter(|| blend(black_box(&base), black_box(&layer), mode, 0.8).unwrap())
            });
        }
    }

    group.finish();
}

/// Benchmark convolution.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in SIZES {
        let src = noise(size, 4);
        group.throughput(Throughput::Elements((size * size) as u64));

        for radius in [1u32, 4] {
            let dim = Dimension::square(2 * radius + 1).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("gaussian_r{radius}"), size),
                &src,
                |b, src| b.iter(|| gaussian(black_box(src), dim, radius as f32, EdgePolicy::Clamp).unwrap()),
            );
        }
        group.bench_with_input(BenchmarkId::new("sharpen", size), &src, |b, src| {
            b.iter(|| sharpen(black_box(src), 2, 1.0).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the tessellations.
fn bench_pixelate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixelate");
    let tile = Dimension::square(16).unwrap();

    for size in SIZES {
        let src = noise(size, 5);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("rect", size), &src, |b, src| {
            b.iter(|| pixelate(black_box(src), tile, TileStyle::Cropped))
        });
        group.bench_with_input(BenchmarkId::new("pxl", size), &src, |b, src| {
            b.iter(|| pxl(black_box(src), tile, TriangleMode::Both, TileStyle::Cropped, false))
        });
        group.bench_with_input(BenchmarkId::new("hxl", size), &src, |b, src| {
            b.iter(|| hxl(black_box(src), 16, TileStyle::Cropped).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("vxl", size), &src, |b, src| {
            b.iter(|| vxl(black_box(src), &VxlOptions::with_height(20)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark scaling with the worker count.
fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("workers");
    let base = noise(1024, 6);
    let layer = noise(1024, 7);
    group.throughput(Throughput::Elements(1024 * 1024));

    for threads in [1usize, 2, 4, 8] {
        let workers = Workers::fixed(threads).unwrap();
        group.bench_with_input(BenchmarkId::new("overlay", threads), &threads, |b, _| {
            b.iter(|| workers.install(|| blend(&base, &layer, BlendMode::Overlay, 1.0).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_models, bench_blend, bench_filter, bench_pixelate, bench_workers);
criterion_main!(benches);
