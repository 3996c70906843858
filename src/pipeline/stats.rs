//! Descriptive statistics over the diamonds table
//!
//! Definitions follow the usual dataframe conventions so the numbers can be
//! reproduced elsewhere: sample standard deviation (n - 1), quantiles by
//! linear interpolation between order statistics, adjusted Fisher-Pearson
//! skewness and bias-corrected excess kurtosis.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::correlation::{correlation_matrix, CorrelationMatrix};
use super::schema::{category_domain, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS, ORIGINAL_COLUMNS, PRICE_PER_CARAT};
use super::table::DiamondTable;
use crate::report::{Cell, SummaryTable};

/// Column headers of a describe table
pub const DESCRIBE_COLUMNS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Eight-number description of one numeric attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.count as i64),
            Cell::float(self.mean),
            Cell::float(self.std),
            Cell::float(self.min),
            Cell::float(self.q25),
            Cell::float(self.median),
            Cell::float(self.q75),
            Cell::float(self.max),
        ]
    }
}

/// Shape and header information captured right after loading
#[derive(Debug, Clone)]
pub struct Overview {
    pub rows: usize,
    pub cols: usize,
    pub columns: Vec<String>,
    pub sample: SummaryTable,
}

/// Every summary table of the statistics section, in report order
#[derive(Debug, Clone)]
pub struct Statistics {
    pub numeric_summary: SummaryTable,
    pub skew_kurtosis: SummaryTable,
    pub unique_counts: SummaryTable,
    pub value_counts: Vec<SummaryTable>,
    pub price_per_carat: SummaryTable,
    pub correlation: CorrelationMatrix,
}

/// Compute all summary tables. Requires the `price_per_carat` column.
pub fn compute_statistics(table: &DiamondTable) -> Result<Statistics> {
    let value_counts = CATEGORICAL_COLUMNS
        .iter()
        .map(|c| value_counts(table, c))
        .collect::<Result<Vec<_>>>()?;

    Ok(Statistics {
        numeric_summary: numeric_summary(table)?,
        skew_kurtosis: skew_kurtosis(table)?,
        unique_counts: unique_counts(table)?,
        value_counts,
        price_per_carat: price_per_carat_summary(table)?,
        correlation: correlation_matrix(table)?,
    })
}

/// Linear-interpolation quantile of already sorted values
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with Bessel's correction
pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

pub fn describe(values: &[f64]) -> Describe {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Describe {
        count: values.len(),
        mean: mean(values),
        std: std_dev(values),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Adjusted Fisher-Pearson skewness (G1)
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }
    let m = mean(values);
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(s2, s3), v| {
        let d = v - m;
        (s2 + d * d, s3 + d * d * d)
    });
    let m2 = m2 / n;
    let m3 = m3 / n;
    if m2 == 0.0 {
        return 0.0;
    }
    ((n * (n - 1.0)).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
}

/// Bias-corrected excess kurtosis (G2)
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return f64::NAN;
    }
    let m = mean(values);
    let (s2, s4) = values.iter().fold((0.0, 0.0), |(s2, s4), v| {
        let d2 = (v - m) * (v - m);
        (s2 + d2, s4 + d2 * d2)
    });

    let adj = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    let numer = n * (n + 1.0) * (n - 1.0) * s4;
    let denom = (n - 2.0) * (n - 3.0) * s2 * s2;
    if denom == 0.0 {
        return 0.0;
    }
    numer / denom - adj
}

/// Shape, column list and leading rows of the table as loaded
pub fn overview(table: &DiamondTable, sample_rows: usize) -> Result<Overview> {
    let (rows, cols) = table.shape();
    let columns = table.column_names();
    let take = sample_rows.min(rows);

    let mut sample = SummaryTable::with_columns("Sample", "", columns.clone());
    let per_column: Vec<Vec<Cell>> = columns
        .iter()
        .map(|name| leading_cells(table.frame(), name, take))
        .collect::<Result<_>>()?;

    for row in 0..take {
        let cells = per_column.iter().map(|c| c[row].clone()).collect();
        sample.push_row(row.to_string(), cells);
    }

    Ok(Overview {
        rows,
        cols,
        columns,
        sample,
    })
}

fn leading_cells(frame: &DataFrame, name: &str, n: usize) -> Result<Vec<Cell>> {
    let column = frame
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let dtype = column.dtype();

    let cells = if dtype.is_integer() {
        let cast = column.cast(&DataType::Int64)?;
        let ca = cast.i64()?;
        (0..n).map(|i| ca.get(i).map_or(Cell::Missing, Cell::Int)).collect()
    } else if dtype.is_primitive_numeric() {
        let cast = column.cast(&DataType::Float64)?;
        let ca = cast.f64()?;
        (0..n).map(|i| ca.get(i).map_or(Cell::Missing, Cell::float)).collect()
    } else {
        let cast = column.cast(&DataType::String)?;
        let ca = cast.as_materialized_series().str()?.clone();
        (0..n)
            .map(|i| ca.get(i).map_or(Cell::Missing, Cell::from))
            .collect()
    };
    Ok(cells)
}

/// count/mean/std/min/quartiles/max per numeric attribute
pub fn numeric_summary(table: &DiamondTable) -> Result<SummaryTable> {
    let mut out = SummaryTable::new("Numeric summary", "", &DESCRIBE_COLUMNS);
    for name in NUMERIC_COLUMNS {
        let values = table.numeric(name)?;
        out.push_row(name, describe(&values).cells());
    }
    Ok(out)
}

/// Skewness and kurtosis per numeric attribute
pub fn skew_kurtosis(table: &DiamondTable) -> Result<SummaryTable> {
    let mut out = SummaryTable::new("Skewness and Kurtosis", "", &["skewness", "kurtosis"]);
    for name in NUMERIC_COLUMNS {
        let values = table.numeric(name)?;
        out.push_row(
            name,
            vec![Cell::float(skewness(&values)), Cell::float(kurtosis(&values))],
        );
    }
    Ok(out)
}

/// Distinct non-null values per original column
pub fn unique_counts(table: &DiamondTable) -> Result<SummaryTable> {
    let mut out = SummaryTable::new("Unique counts (per column)", "", &["unique_count"]);
    for name in ORIGINAL_COLUMNS {
        let column = table
            .frame()
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?;
        let series = column.as_materialized_series().drop_nulls();
        let unique = series
            .n_unique()
            .with_context(|| format!("Failed to count unique values of '{}'", name))?;
        out.push_row(name, vec![Cell::Int(unique as i64)]);
    }
    Ok(out)
}

/// Frequency of each category, most frequent first.
///
/// Ties keep the category-domain order; values outside the known domain
/// follow in order of first appearance.
pub fn value_counts(table: &DiamondTable, column: &str) -> Result<SummaryTable> {
    let values = table.categorical(column)?;

    let mut order: Vec<String> = category_domain(column)
        .map(|d| d.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default();
    for v in &values {
        if !order.contains(v) {
            order.push(v.clone());
        }
    }

    let mut counts: Vec<(String, usize)> = order
        .into_iter()
        .map(|cat| {
            let n = values.iter().filter(|v| **v == cat).count();
            (cat, n)
        })
        .filter(|(_, n)| *n > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = SummaryTable::new(column, column, &["count"]);
    for (cat, n) in counts {
        out.push_row(cat, vec![Cell::Int(n as i64)]);
    }
    Ok(out)
}

/// Describe table of the derived price-per-carat column, one row per statistic
pub fn price_per_carat_summary(table: &DiamondTable) -> Result<SummaryTable> {
    let values = table
        .numeric(PRICE_PER_CARAT)
        .context("price_per_carat must be derived before summarising it")?;
    let stats = describe(&values);

    let mut out = SummaryTable::new("Price per Carat (derived)", "", &[PRICE_PER_CARAT]);
    for (name, cell) in DESCRIBE_COLUMNS.iter().zip(stats.cells()) {
        out.push_row(*name, vec![cell]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_std_uses_bessel_correction() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Population std is 2.0; sample std is sqrt(32 / 7)
        assert!(approx(std_dev(&values), (32.0f64 / 7.0).sqrt(), 1e-12));
        assert!(std_dev(&[1.0]).is_nan());
    }

    #[test]
    fn test_describe_ordering() {
        let values = [5.0, 1.0, 9.0, 3.0, 7.0];
        let d = describe(&values);
        assert_eq!(d.count, 5);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.q25, 3.0);
        assert_eq!(d.median, 5.0);
        assert_eq!(d.q75, 7.0);
        assert_eq!(d.max, 9.0);
        assert!(d.std >= 0.0);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        assert!(approx(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0, 1e-12));
    }

    #[test]
    fn test_skewness_known_value() {
        // Reference value from the adjusted Fisher-Pearson formula
        let values = [1.0, 2.0, 3.0, 10.0];
        assert!(approx(skewness(&values), 1.7636, 1e-3));
    }

    #[test]
    fn test_kurtosis_known_value() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(approx(kurtosis(&values), -1.2, 1e-12));
        assert!(kurtosis(&[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_zero_variance_shape() {
        assert_eq!(skewness(&[2.0; 6]), 0.0);
        assert_eq!(kurtosis(&[2.0; 6]), 0.0);
    }
}
