//! Cross-tabulations paired with each chart

use anyhow::{Context, Result};

use super::binning::cut_equal_width;
use super::correlation::CorrelationMatrix;
use super::schema::{CLARITY_ORDER, COLOR_ORDER, CUT_ORDER};
use super::stats::{mean, quantile};
use super::table::DiamondTable;
use crate::report::{Cell, SummaryTable};

/// Number of equal-width price bins in the distribution table
pub const PRICE_BINS: usize = 10;

/// Number of equal-width carat bins in the carat/color pivot
pub const CARAT_BINS: usize = 8;

/// Group `values` by `keys`, one bucket per entry of `order`.
/// Keys outside `order` are ignored.
pub fn group_by_category(keys: &[String], values: &[f64], order: &[&str]) -> Vec<Vec<f64>> {
    let mut groups = vec![Vec::new(); order.len()];
    for (key, &value) in keys.iter().zip(values) {
        if let Some(idx) = order.iter().position(|o| *o == key.as_str()) {
            groups[idx].push(value);
        }
    }
    groups
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// Items per price interval, ten equal-width bins
pub fn price_bin_counts(table: &DiamondTable) -> Result<SummaryTable> {
    let price = table.numeric("price")?;
    let binning = cut_equal_width(&price, PRICE_BINS)?;

    let mut out = SummaryTable::new("Price bins", "price", &["count"]);
    for (label, count) in binning.labels.iter().zip(binning.counts()) {
        out.push_row(label.clone(), vec![Cell::Int(count as i64)]);
    }
    Ok(out)
}

/// Median, quartiles and IQR of price per cut, worst cut first
pub fn price_spread_by_cut(table: &DiamondTable) -> Result<SummaryTable> {
    let cut = table.categorical("cut")?;
    let price = table.numeric("price")?;
    let groups = group_by_category(&cut, &price, &CUT_ORDER);

    let mut out = SummaryTable::new("Price spread by cut", "cut", &["median", "q1", "q3", "IQR"]);
    for (name, group) in CUT_ORDER.iter().zip(groups) {
        let group = sorted(group);
        let q1 = quantile(&group, 0.25);
        let q3 = quantile(&group, 0.75);
        out.push_row(
            *name,
            vec![
                Cell::float(quantile(&group, 0.5)),
                Cell::float(q1),
                Cell::float(q3),
                Cell::float(q3 - q1),
            ],
        );
    }
    Ok(out)
}

/// Mean price per (carat bin, color), rounded to 2 decimals.
///
/// Requires the carat bins to have been derived. Combinations without
/// items are reported as missing.
pub fn mean_price_by_carat_color(table: &DiamondTable) -> Result<SummaryTable> {
    let binning = table
        .carat_bins()
        .context("carat bins must be derived before pivoting on them")?;
    let color = table.categorical("color")?;
    let price = table.numeric("price")?;

    let mut sums = vec![vec![0.0f64; COLOR_ORDER.len()]; binning.len()];
    let mut counts = vec![vec![0usize; COLOR_ORDER.len()]; binning.len()];
    for ((bin, c), p) in binning.assignment.iter().zip(&color).zip(&price) {
        let (Some(bin), Some(ci)) = (bin, COLOR_ORDER.iter().position(|o| *o == c.as_str())) else {
            continue;
        };
        sums[*bin][ci] += p;
        counts[*bin][ci] += 1;
    }

    let mut out = SummaryTable::new("Mean price by carat bin and color", "carat_bin", &COLOR_ORDER);
    for (b, label) in binning.labels.iter().enumerate() {
        let cells = (0..COLOR_ORDER.len())
            .map(|ci| match counts[b][ci] {
                0 => Cell::Missing,
                n => Cell::float(sums[b][ci] / n as f64),
            })
            .collect();
        out.push_row(label.clone(), cells);
    }
    Ok(out.rounded(2))
}

/// Median and mean price per clarity grade, best grade first
pub fn price_by_clarity(table: &DiamondTable) -> Result<SummaryTable> {
    let clarity = table.categorical("clarity")?;
    let price = table.numeric("price")?;
    let groups = group_by_category(&clarity, &price, &CLARITY_ORDER);

    let mut out = SummaryTable::new("Price by clarity", "clarity", &["median", "mean"]);
    for (name, group) in CLARITY_ORDER.iter().zip(groups) {
        let m = mean(&group);
        let group = sorted(group);
        out.push_row(
            *name,
            vec![Cell::float(quantile(&group, 0.5)), Cell::float(m)],
        );
    }
    Ok(out.rounded(2))
}

/// Correlation matrix rounded to 3 decimals
pub fn rounded_correlation(matrix: &CorrelationMatrix) -> SummaryTable {
    matrix.to_table("Correlation matrix").rounded(3)
}

/// Mean price per cut, worst cut first
pub fn avg_price_by_cut(table: &DiamondTable) -> Result<SummaryTable> {
    let cut = table.categorical("cut")?;
    let price = table.numeric("price")?;
    let groups = group_by_category(&cut, &price, &CUT_ORDER);

    let mut out = SummaryTable::new("Average price by cut", "cut", &["avg_price"]);
    for (name, group) in CUT_ORDER.iter().zip(groups) {
        out.push_row(*name, vec![Cell::float(mean(&group))]);
    }
    Ok(out)
}
