//! Shared test utilities and fixture generators

#![allow(dead_code)]

use diamond_eda::pipeline::schema::{CLARITY_ORDER, COLOR_ORDER, CUT_ORDER};
use diamond_eda::pipeline::{DatasetSource, DiamondTable, DATASET_FILE};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// A URL nothing listens on, so a test can never reach the network
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/diamonds.csv";

/// Create a diamonds-shaped DataFrame with plausible values.
///
/// Categories cycle through their full domains first, so every cut,
/// color and clarity grade appears once `rows >= 8`. Price grows with
/// carat so the correlation is strongly positive.
pub fn create_diamonds_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut carat = Vec::with_capacity(rows);
    let mut cut = Vec::with_capacity(rows);
    let mut color = Vec::with_capacity(rows);
    let mut clarity = Vec::with_capacity(rows);
    let mut depth = Vec::with_capacity(rows);
    let mut table = Vec::with_capacity(rows);
    let mut price = Vec::with_capacity(rows);
    let mut x = Vec::with_capacity(rows);
    let mut y = Vec::with_capacity(rows);
    let mut z = Vec::with_capacity(rows);

    for i in 0..rows {
        let c: f64 = (rng.gen_range(0.2..3.0f64) * 100.0).round() / 100.0;
        carat.push(c);
        cut.push(CUT_ORDER[i % CUT_ORDER.len()].to_string());
        color.push(COLOR_ORDER[i % COLOR_ORDER.len()].to_string());
        clarity.push(CLARITY_ORDER[i % CLARITY_ORDER.len()].to_string());
        depth.push((rng.gen_range(55.0..70.0f64) * 10.0).round() / 10.0);
        table.push(rng.gen_range(50..70) as f64);
        price.push(326 + (c * 4000.0) as i64 + rng.gen_range(0..500i64));

        let side = 3.0 + c * 2.5;
        x.push((side * 100.0).round() / 100.0);
        y.push(((side + rng.gen_range(-0.05..0.05f64)) * 100.0).round() / 100.0);
        z.push((side * 0.62 * 100.0).round() / 100.0);
    }

    df! {
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
    .unwrap()
}

/// Same as [`create_diamonds_dataframe`], wrapped in a validated table
pub fn create_diamond_table(rows: usize) -> DiamondTable {
    DiamondTable::new(create_diamonds_dataframe(rows, 42)).unwrap()
}

/// Write `df` as the cached dataset of a fresh data home.
///
/// The returned source points at an unreachable URL, so any attempt to
/// download instead of reading the cache fails loudly.
pub fn create_cached_source(df: &mut DataFrame) -> (TempDir, DatasetSource) {
    let temp_dir = TempDir::new().unwrap();
    let data_home = temp_dir.path().join("seaborn-data");
    std::fs::create_dir_all(&data_home).unwrap();

    let mut file = std::fs::File::create(data_home.join(DATASET_FILE)).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    let source = DatasetSource {
        url: UNREACHABLE_URL.to_string(),
        data_home,
        refresh: false,
    };
    (temp_dir, source)
}

/// Assert two floats agree within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}
