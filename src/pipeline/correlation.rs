//! Pearson correlation matrix over the numeric columns

use anyhow::Result;
use faer::Mat;

use super::table::DiamondTable;
use crate::report::{Cell, SummaryTable};

/// Square correlation matrix labelled by column name
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Correlation between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[i][j])
    }

    pub fn to_table(&self, title: &str) -> SummaryTable {
        let mut table = SummaryTable::with_columns(title, "", self.names.clone());
        for (name, row) in self.names.iter().zip(&self.values) {
            table.push_row(name.clone(), row.iter().map(|&v| Cell::float(v)).collect());
        }
        table
    }
}

/// Pearson correlation over every numeric column currently in the table.
pub fn correlation_matrix(table: &DiamondTable) -> Result<CorrelationMatrix> {
    let names = table.numeric_column_names();
    let columns = names
        .iter()
        .map(|name| table.numeric(name))
        .collect::<Result<Vec<_>>>()?;

    let values = pearson_matrix(&columns);
    Ok(CorrelationMatrix { names, values })
}

/// Compute the correlation matrix as `Z^T * Z` over standardized columns.
///
/// Each column is centred and scaled by `sqrt(sum of squared deviations)`,
/// so the product yields Pearson coefficients directly. Constant columns
/// produce NaN rows and columns. The result is mirrored to exact symmetry
/// with an exact 1.0 diagonal.
pub fn pearson_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n_cols = columns.len();
    let n_rows = columns.first().map_or(0, |c| c.len());

    let standardized: Vec<Option<Vec<f64>>> = columns
        .iter()
        .map(|col| {
            if col.len() != n_rows || n_rows < 2 {
                return None;
            }
            let mean = col.iter().sum::<f64>() / n_rows as f64;
            let ss: f64 = col.iter().map(|x| (x - mean) * (x - mean)).sum();
            if ss == 0.0 {
                return None;
            }
            let norm = ss.sqrt();
            Some(col.iter().map(|x| (x - mean) / norm).collect())
        })
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, col) in standardized.iter().enumerate() {
        if let Some(col) = col {
            for (row_idx, &val) in col.iter().enumerate() {
                z[(row_idx, col_idx)] = val;
            }
        }
    }
    let product = z.transpose() * &z;

    let mut out = vec![vec![f64::NAN; n_cols]; n_cols];
    for i in 0..n_cols {
        if standardized[i].is_none() {
            continue;
        }
        out[i][i] = 1.0;
        for j in (i + 1)..n_cols {
            if standardized[j].is_none() {
                continue;
            }
            let r = product[(i, j)].clamp(-1.0, 1.0);
            out[i][j] = r;
            out[j][i] = r;
        }
    }
    out
}
