//! Benchmark of the statistics stage at reference scale
//!
//! Run with: cargo bench --bench stats_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use diamond_eda::pipeline::binning::cut_equal_width;
use diamond_eda::pipeline::schema::{CLARITY_ORDER, COLOR_ORDER, CUT_ORDER, REFERENCE_ROWS};
use diamond_eda::pipeline::{compute_statistics, pearson_matrix, DiamondTable};
use diamond_eda::viz::kde::GaussianKde;

/// Synthetic diamonds frame with the reference schema
fn generate_diamonds(n_rows: usize, seed: u64) -> DiamondTable {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let carat: Vec<f64> = (0..n_rows).map(|_| 0.2 + rng.gen::<f64>() * 4.8).collect();
    let price: Vec<i64> = carat
        .iter()
        .map(|c| 326 + (c * c * 2500.0) as i64 + rng.gen_range(0..1000))
        .collect();
    let pick = |domain: &[&str], rng: &mut StdRng| domain[rng.gen_range(0..domain.len())].to_string();
    let cut: Vec<String> = (0..n_rows).map(|_| pick(&CUT_ORDER, &mut rng)).collect();
    let color: Vec<String> = (0..n_rows).map(|_| pick(&COLOR_ORDER, &mut rng)).collect();
    let clarity: Vec<String> = (0..n_rows).map(|_| pick(&CLARITY_ORDER, &mut rng)).collect();
    let depth: Vec<f64> = (0..n_rows).map(|_| 55.0 + rng.gen::<f64>() * 15.0).collect();
    let table: Vec<f64> = (0..n_rows).map(|_| 50.0 + rng.gen::<f64>() * 20.0).collect();
    let x: Vec<f64> = carat.iter().map(|c| 3.0 + c * 2.5).collect();
    let y: Vec<f64> = x.iter().map(|v| v + rng.gen::<f64>() * 0.1).collect();
    let z: Vec<f64> = x.iter().map(|v| v * 0.62).collect();

    let df = df! {
        "carat" => carat,
        "cut" => cut,
        "color" => color,
        "clarity" => clarity,
        "depth" => depth,
        "table" => table,
        "price" => price,
        "x" => x,
        "y" => y,
        "z" => z,
    }
    .expect("Failed to create DataFrame");

    DiamondTable::new(df).expect("Synthetic frame has the reference schema")
}

/// All summary tables, for growing row counts up to the reference size
fn benchmark_compute_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_statistics");
    group.sample_size(10);

    for n_rows in [5_000, 20_000, REFERENCE_ROWS] {
        let mut table = generate_diamonds(n_rows, 42);
        table
            .derive_price_per_carat()
            .expect("Failed to derive price_per_carat");

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &table, |b, table| {
            b.iter(|| {
                let _ = compute_statistics(black_box(table));
            });
        });
    }

    group.finish();
}

/// Correlation matrix alone, eight columns at reference size
fn benchmark_pearson_matrix(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let columns: Vec<Vec<f64>> = (0..8)
        .map(|_| (0..REFERENCE_ROWS).map(|_| rng.gen::<f64>()).collect())
        .collect();

    c.bench_function("pearson_matrix_8x53940", |b| {
        b.iter(|| pearson_matrix(black_box(&columns)));
    });
}

/// Equal-width binning and density curve, the two heaviest chart inputs
fn benchmark_chart_inputs(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(9);
    let values: Vec<f64> = (0..REFERENCE_ROWS).map(|_| rng.gen::<f64>() * 18_000.0).collect();

    let mut group = c.benchmark_group("chart_inputs");
    group.sample_size(10);

    group.bench_function("cut_equal_width_10", |b| {
        b.iter(|| cut_equal_width(black_box(&values), 10));
    });

    group.bench_function("kde_curve_200", |b| {
        b.iter(|| {
            GaussianKde::new(black_box(&values))
                .map(|kde| kde.curve(0.0, 18_000.0, 200))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_compute_statistics,
    benchmark_pearson_matrix,
    benchmark_chart_inputs,
);
criterion_main!(benches);
