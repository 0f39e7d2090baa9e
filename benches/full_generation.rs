//! Performance measurement for complete generation runs at varying sizes

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tileweave::algorithm::executor::{Generator, GeneratorConfig};
use tileweave::analysis::adjacency::AdjacencyModel;
use tileweave::spatial::tiles::TileValue;

const A: TileValue = TileValue::Single(0);
const B: TileValue = TileValue::Single(1);

fn checker_model() -> AdjacencyModel {
    let sample = [A, B, A, B, A, B, A, B, A];
    match AdjacencyModel::derive(&sample, 3) {
        Ok(model) => model,
        Err(_) => unreachable!("checkerboard sample is well formed"),
    }
}

/// Measures end-to-end generation cost as the output grid grows
fn bench_generate(c: &mut Criterion) {
    let model = checker_model();
    let mut group = c.benchmark_group("generate");

    for size in &[8usize, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let generator = match Generator::new(
                    model.clone(),
                    GeneratorConfig::new(size, size),
                    black_box(42),
                ) {
                    Ok(generator) => generator,
                    Err(_) => return,
                };
                let _ = black_box(generator.generate());
            });
        });
    }

    group.finish();
}

/// Measures adjacency derivation on repeated sample tilings
fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");

    for repeat in &[4usize, 16, 64] {
        let width = 3 * repeat;
        let row = [A, B, A].repeat(*repeat);
        let mut sample = Vec::new();
        for _ in 0..3 {
            sample.extend_from_slice(&row);
        }

        group.bench_with_input(BenchmarkId::from_parameter(repeat), &sample, |b, sample| {
            b.iter(|| {
                let _ = black_box(AdjacencyModel::derive(black_box(sample), width));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_derive);
criterion_main!(benches);
