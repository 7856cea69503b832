use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::{Level, MineField, SeededSource};

fn bench_regenerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("regenerate");

    for level in [Level::Easy, Level::Normal, Level::Expert] {
        let config = level.config();
        let mut rng = SeededSource::new(0x5eed);
        let mut field = MineField::from_config(&config, &mut rng).expect("preset should be valid");

        group.bench_with_input(BenchmarkId::from_parameter(level), &config, |b, config| {
            b.iter(|| {
                field
                    .regenerate(config.rows, config.cols, config.mines, &mut rng)
                    .expect("preset should be valid");
                black_box(field.unrevealed_count())
            })
        });
    }

    // nearly full boards make the rejection sampler redraw a lot
    let mut rng = SeededSource::new(7);
    group.bench_function("dense_16x16", |b| {
        b.iter(|| black_box(MineField::generate(16, 16, 255, &mut rng).expect("should fit")))
    });

    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood");

    for size in [16u8, 64, 255] {
        let template =
            MineField::with_mines(size, size, &[(size - 1, size - 1)]).expect("should fit");

        group.bench_with_input(BenchmarkId::from_parameter(size), &template, |b, template| {
            b.iter_batched(
                || template.clone(),
                |mut field| {
                    field.primary_press((0, 0)).expect("in bounds");
                    black_box(field.primary_release((0, 0)).expect("in bounds"))
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_regenerate, bench_flood);
criterion_main!(benches);
