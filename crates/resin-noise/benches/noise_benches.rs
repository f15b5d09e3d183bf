//! Benchmarks for noise functions.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rhizome_resin_noise::{FractalNoise, GradientNoise, Noise};

fn bench_gradient(c: &mut Criterion) {
    let noise = GradientNoise::with_seed(42);

    c.bench_function("gradient1", |b| {
        b.iter(|| noise.noise_1d(black_box(1.234)))
    });

    c.bench_function("gradient2", |b| {
        b.iter(|| noise.noise_2d(black_box(1.234), black_box(5.678)))
    });

    c.bench_function("gradient3", |b| {
        b.iter(|| noise.noise_3d(black_box(1.234), black_box(5.678), black_box(9.012)))
    });
}

fn bench_fractal(c: &mut Criterion) {
    let noise = GradientNoise::with_seed(42);

    c.bench_function("fractal2_4oct", |b| {
        let fbm = FractalNoise::new(&noise, 4, 0.5, 2.0);
        b.iter(|| fbm.noise_2d(black_box(1.234), black_box(5.678)))
    });

    c.bench_function("fractal2_8oct", |b| {
        let fbm = FractalNoise::new(&noise, 8, 0.5, 2.0);
        b.iter(|| fbm.noise_2d(black_box(1.234), black_box(5.678)))
    });

    c.bench_function("fractal3_4oct", |b| {
        let fbm = FractalNoise::new(&noise, 4, 0.5, 2.0);
        b.iter(|| {
            fbm.noise_3d(
                black_box(1.234),
                black_box(5.678),
                black_box(9.012),
            )
        })
    });
}

fn bench_table(c: &mut Criterion) {
    c.bench_function("gradient_table_seeded", |b| {
        b.iter(|| GradientNoise::with_seed(black_box(42)))
    });
}

criterion_group!(benches, bench_gradient, bench_fractal, bench_table);
criterion_main!(benches);
