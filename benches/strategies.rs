//! Permutation strategy and tag rendering benchmarks
//!
//! Toyota Way: Genchi Genbutsu (measure, don't guess)
//!
//! Run with: cargo bench --bench strategies

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_ensemble::params::{Configuration, ParamValue, ParameterSet};
use trueno_ensemble::writer::TaggedFileWriter;
use trueno_ensemble::{PermutationStrategy, StrategyOptions};

/// `params` parameters with `width` integer values each
fn parameter_space(params: usize, width: usize) -> (Vec<String>, Vec<Vec<ParamValue>>) {
    let mut set = ParameterSet::new();
    for p in 0..params {
        let values: Vec<i64> = (0..width as i64).map(|v| v * 10).collect();
        set.insert(format!("P{p}"), values);
    }
    set.to_names_and_values().unwrap()
}

/// Benchmark each built-in strategy over growing parameter spaces
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("permute");

    for (params, width) in [(2, 10), (3, 10), (4, 10)] {
        let (names, values) = parameter_space(params, width);
        let space = width.pow(params as u32);

        group.bench_with_input(
            BenchmarkId::new("all_perm", space),
            &(&names, &values),
            |b, (names, values)| {
                let options = StrategyOptions::default();
                b.iter(|| {
                    PermutationStrategy::AllPermutations
                        .permute(black_box(names), black_box(values), &options)
                        .unwrap()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("random_100", space),
            &(&names, &values),
            |b, (names, values)| {
                let options = StrategyOptions::default().n_models(100).seed(7);
                b.iter(|| {
                    PermutationStrategy::Random
                        .permute(black_box(names), black_box(values), &options)
                        .unwrap()
                });
            },
        );
    }

    let (names, values) = parameter_space(4, 1_000);
    group.bench_function("step_1000", |b| {
        let options = StrategyOptions::default();
        b.iter(|| {
            PermutationStrategy::Step
                .permute(black_box(&names), black_box(&values), &options)
                .unwrap()
        });
    });

    group.finish();
}

/// Benchmark tagged-file rendering on a LAMMPS-sized input
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let mut config = Configuration::new();
    config.insert("THERMO".to_string(), ParamValue::Int(10));
    config.insert("STEPS".to_string(), ParamValue::Int(20_000));
    config.insert("LATTICE".to_string(), ParamValue::Str("fcc".into()));

    for lines in [100, 10_000] {
        let text: String = (0..lines)
            .map(|i| match i % 4 {
                0 => "thermo ;THERMO;\n",
                1 => "run ;STEPS;\n",
                2 => "lattice ;LATTICE; ;UNKNOWN;\n",
                _ => "velocity all create 300.0 4928459\n",
            })
            .collect();
        let writer = TaggedFileWriter::new();

        group.bench_with_input(BenchmarkId::new("default_tag", lines), &text, |b, text| {
            b.iter(|| writer.render(black_box(text), &config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_render);
criterion_main!(benches);
