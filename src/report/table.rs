//! Summary table data type shared by the statistics, pivots and report

use serde::Serialize;

use crate::pipeline::binning::round_to;

/// A single table value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Numeric view of the cell, `None` for text and missing values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// Float cell, or `Missing` for NaN
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            Cell::Missing
        } else {
            Cell::Float(v)
        }
    }

    /// Text rendering used in the report
    pub fn render(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format_general(*v),
            Cell::Text(s) => s.clone(),
            Cell::Missing => "nan".to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One labelled row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// A small derived table keyed by attribute name or category value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub title: String,
    pub index_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl SummaryTable {
    pub fn new(title: impl Into<String>, index_name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            index_name: index_name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_columns(
        title: impl Into<String>,
        index_name: impl Into<String>,
        columns: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            index_name: index_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, label: impl Into<String>, cells: Vec<Cell>) {
        self.rows.push(Row {
            label: label.into(),
            cells,
        });
    }

    pub fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Cell at (`row`, `column`) by label
    pub fn get(&self, row: &str, column: &str) -> Option<&Cell> {
        let col_idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.label == row)
            .and_then(|r| r.cells.get(col_idx))
    }

    /// Numeric value at (`row`, `column`)
    pub fn value(&self, row: &str, column: &str) -> Option<f64> {
        self.get(row, column).and_then(Cell::as_f64)
    }

    /// True when some row does not have one cell per column
    pub fn is_ragged(&self) -> bool {
        self.rows.iter().any(|r| r.cells.len() != self.columns.len())
    }

    /// Copy with every float rounded to `digits` decimals
    pub fn rounded(&self, digits: i32) -> Self {
        let mut out = self.clone();
        for row in &mut out.rows {
            for cell in &mut row.cells {
                if let Cell::Float(v) = cell {
                    *v = round_to(*v, digits);
                }
            }
        }
        out
    }
}

/// `%g`-style rendering: six significant digits, trailing zeros dropped,
/// scientific notation outside [1e-4, 1e6).
pub fn format_general(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:.5e}", v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(&mantissa), sign, exp.abs())
    } else {
        let decimals = (5 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, v))
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
