//! In-memory diamonds table
//!
//! Wraps the loaded `DataFrame`. Original columns are never replaced or
//! dropped; the only mutation is adding each derived column once.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::binning::{cut_equal_width, Binning};
use super::schema::{CARAT_BIN, ORIGINAL_COLUMNS, PRICE_PER_CARAT};
use crate::error::EdaError;

#[derive(Debug, Clone)]
pub struct DiamondTable {
    frame: DataFrame,
    carat_bins: Option<Binning>,
}

impl DiamondTable {
    /// Wrap a frame, checking that every original column is present and
    /// free of nulls.
    pub fn new(frame: DataFrame) -> Result<Self> {
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = ORIGINAL_COLUMNS
            .iter()
            .copied()
            .filter(|c| !names.iter().any(|n| n == c))
            .collect();
        if !missing.is_empty() {
            return Err(EdaError::dataset(
                "loaded frame",
                format!("missing column(s): {}", missing.join(", ")),
            )
            .into());
        }

        let with_nulls: Vec<&str> = ORIGINAL_COLUMNS
            .iter()
            .copied()
            .filter(|c| frame.column(c).is_ok_and(|col| col.null_count() > 0))
            .collect();
        if !with_nulls.is_empty() {
            return Err(EdaError::dataset(
                "loaded frame",
                format!("null values in column(s): {}", with_nulls.join(", ")),
            )
            .into());
        }

        Ok(Self {
            frame,
            carat_bins: None,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Names of every numeric column, in frame order
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|col| col.dtype().is_primitive_numeric())
            .map(|col| col.name().to_string())
            .collect()
    }

    /// One `f64` per row, aligned with `categorical`. Nulls become NaN.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .frame
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;

        let values = column
            .f64()?
            .iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }

    /// Values of a categorical column as text, nulls rendered as empty strings
    pub fn categorical(&self, name: &str) -> Result<Vec<String>> {
        let column = self
            .frame
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?;

        let values = column
            .cast(&DataType::String)
            .with_context(|| format!("Column '{}' cannot be read as text", name))?
            .as_materialized_series()
            .str()
            .with_context(|| format!("Column '{}' is not a string column", name))?
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(values)
    }

    /// Add `price_per_carat = price / carat`. Division is unconditional.
    pub fn derive_price_per_carat(&mut self) -> Result<()> {
        self.ensure_absent(PRICE_PER_CARAT)?;

        let price = self.numeric("price")?;
        let carat = self.numeric("carat")?;
        let ratio: Vec<f64> = price.iter().zip(carat.iter()).map(|(p, c)| p / c).collect();

        self.frame
            .with_column(Column::new(PRICE_PER_CARAT.into(), ratio))
            .context("Failed to add price_per_carat column")?;
        Ok(())
    }

    /// Add the `carat_bin` category holding the interval label of each row.
    pub fn derive_carat_bins(&mut self, bins: usize) -> Result<&Binning> {
        self.ensure_absent(CARAT_BIN)?;

        let carat = self.numeric("carat")?;
        let binning = cut_equal_width(&carat, bins)?;
        let labels: Vec<Option<String>> = binning
            .assignment
            .iter()
            .map(|a| a.map(|idx| binning.labels[idx].clone()))
            .collect();

        self.frame
            .with_column(Column::new(CARAT_BIN.into(), labels))
            .context("Failed to add carat_bin column")?;

        let binning = self.carat_bins.insert(binning);
        Ok(&*binning)
    }

    /// Carat binning, once derived
    pub fn carat_bins(&self) -> Option<&Binning> {
        self.carat_bins.as_ref()
    }

    fn ensure_absent(&self, name: &str) -> Result<()> {
        if self.frame.get_column_index(name).is_some() {
            return Err(EdaError::DerivedColumnExists(name.to_string()).into());
        }
        Ok(())
    }
}
