//! Tests for the summary statistics over a synthetic diamonds table

use diamond_eda::error::EdaError;
use diamond_eda::pipeline::schema::{NUMERIC_COLUMNS, ORIGINAL_COLUMNS, PRICE_PER_CARAT};
use diamond_eda::pipeline::{compute_statistics, overview, Statistics};
use diamond_eda::report::Cell;

#[path = "common/mod.rs"]
mod common;

fn statistics(rows: usize) -> Statistics {
    let mut table = common::create_diamond_table(rows);
    table.derive_price_per_carat().unwrap();
    compute_statistics(&table).unwrap()
}

#[test]
fn test_numeric_summary_quantiles_are_ordered() {
    let stats = statistics(200);
    let summary = &stats.numeric_summary;

    assert_eq!(summary.row_labels(), NUMERIC_COLUMNS.to_vec());
    for name in NUMERIC_COLUMNS {
        let get = |col: &str| summary.value(name, col).unwrap();
        assert_eq!(get("count"), 200.0, "count of {}", name);
        assert!(get("min") <= get("25%"), "{}: min > q1", name);
        assert!(get("25%") <= get("50%"), "{}: q1 > median", name);
        assert!(get("50%") <= get("75%"), "{}: median > q3", name);
        assert!(get("75%") <= get("max"), "{}: q3 > max", name);
        assert!(get("std") >= 0.0, "{}: negative std", name);
    }
}

#[test]
fn test_value_counts_cover_every_row() {
    let stats = statistics(157);

    assert_eq!(stats.value_counts.len(), 3);
    for counts in &stats.value_counts {
        let values: Vec<i64> = counts
            .rows
            .iter()
            .map(|r| match r.cells[0] {
                Cell::Int(n) => n,
                ref other => panic!("unexpected cell {:?}", other),
            })
            .collect();

        assert_eq!(values.iter().sum::<i64>(), 157, "{} counts", counts.index_name);
        assert!(
            values.windows(2).all(|w| w[0] >= w[1]),
            "{} counts should be sorted descending",
            counts.index_name
        );
    }
}

#[test]
fn test_unique_counts_per_original_column() {
    let stats = statistics(100);
    let unique = &stats.unique_counts;

    assert_eq!(unique.row_labels(), ORIGINAL_COLUMNS.to_vec());
    assert_eq!(unique.value("cut", "unique_count"), Some(5.0));
    assert_eq!(unique.value("color", "unique_count"), Some(7.0));
    assert_eq!(unique.value("clarity", "unique_count"), Some(8.0));
}

#[test]
fn test_correlation_matrix_includes_derived_column() {
    let stats = statistics(300);
    let corr = &stats.correlation;

    assert_eq!(corr.len(), NUMERIC_COLUMNS.len() + 1);
    assert!(corr.names.iter().any(|n| n == PRICE_PER_CARAT));

    for a in &corr.names {
        common::assert_close(corr.get(a, a).unwrap(), 1.0, 1e-12, "diagonal");
        for b in &corr.names {
            let ab = corr.get(a, b).unwrap();
            let ba = corr.get(b, a).unwrap();
            common::assert_close(ab, ba, 1e-12, "symmetry");
            assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&ab), "{} vs {} out of range", a, b);
        }
    }

    // Price is generated from carat
    assert!(corr.get("price", "carat").unwrap() > 0.9);
}

#[test]
fn test_price_per_carat_matches_division() {
    let mut table = common::create_diamond_table(50);
    table.derive_price_per_carat().unwrap();

    let price = table.numeric("price").unwrap();
    let carat = table.numeric("carat").unwrap();
    let ppc = table.numeric(PRICE_PER_CARAT).unwrap();

    for ((p, c), v) in price.iter().zip(&carat).zip(&ppc) {
        common::assert_close(*v, p / c, 1e-9, "price_per_carat");
    }
}

#[test]
fn test_price_per_carat_summary_rows() {
    let stats = statistics(80);
    let labels = stats.price_per_carat.row_labels();

    assert_eq!(
        labels,
        vec!["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
    );
    assert_eq!(stats.price_per_carat.columns, vec![PRICE_PER_CARAT.to_string()]);
}

#[test]
fn test_deriving_twice_is_rejected() {
    let mut table = common::create_diamond_table(20);
    table.derive_price_per_carat().unwrap();

    let err = table.derive_price_per_carat().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EdaError>(),
        Some(EdaError::DerivedColumnExists(_))
    ));
}

#[test]
fn test_overview_reflects_loaded_table() {
    let table = common::create_diamond_table(12);
    let overview = overview(&table, 5).unwrap();

    assert_eq!((overview.rows, overview.cols), (12, 10));
    assert_eq!(overview.columns, ORIGINAL_COLUMNS.to_vec());
    assert_eq!(overview.sample.rows.len(), 5);
    assert_eq!(overview.sample.row_labels(), vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn test_overview_sample_shorter_than_requested() {
    let table = common::create_diamond_table(3);
    let overview = overview(&table, 5).unwrap();
    assert_eq!(overview.sample.rows.len(), 3);
}
