//! Table-to-text conversion for the report
//!
//! The grid formatter produces aligned markdown tables through comfy-table.
//! When it rejects a table, the plain formatter renders a simple delimited
//! table instead so the report can always be produced.

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{Cell as GridCell, CellAlignment, Table};
use thiserror::Error;

use super::table::SummaryTable;

/// Reasons the grid formatter declines a table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("row '{row}' has {found} cells, expected {expected}")]
    Ragged {
        row: String,
        found: usize,
        expected: usize,
    },

    #[error("cell in row '{row}' contains a line break or pipe")]
    UnsafeCell { row: String },
}

/// Converts a summary table into report text
pub trait TableFormatter {
    fn name(&self) -> &'static str;

    fn format(&self, table: &SummaryTable) -> Result<String, FormatError>;
}

/// Aligned markdown grid, numeric columns right-aligned
pub struct GridFormatter;

impl TableFormatter for GridFormatter {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn format(&self, table: &SummaryTable) -> Result<String, FormatError> {
        validate(table)?;

        let mut grid = Table::new();
        grid.load_preset(ASCII_MARKDOWN);
        grid.force_no_tty();

        let mut header = vec![GridCell::new(&table.index_name)];
        header.extend(table.columns.iter().map(GridCell::new));
        grid.set_header(header);

        for row in &table.rows {
            let mut cells = vec![GridCell::new(&row.label)];
            cells.extend(row.cells.iter().map(|c| GridCell::new(c.render())));
            grid.add_row(cells);
        }

        for idx in 0..table.columns.len() {
            let numeric = table
                .rows
                .iter()
                .all(|r| r.cells.get(idx).map_or(true, |c| c.is_numeric() || c.render() == "nan"));
            if numeric {
                if let Some(column) = grid.column_mut(idx + 1) {
                    column.set_cell_alignment(CellAlignment::Right);
                }
            }
        }

        Ok(grid.to_string())
    }
}

/// Header row, separator row, one row per entry. Never fails.
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn render(&self, table: &SummaryTable) -> String {
        let mut out = String::new();
        out.push_str("| Index | ");
        out.push_str(&table.columns.join(" | "));
        out.push_str(" |\n");
        out.push_str(&"|---".repeat(table.columns.len() + 1));
        out.push_str("|\n");

        for row in &table.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| sanitize(&c.render())).collect();
            out.push_str(&format!("| {} | {} |\n", sanitize(&row.label), cells.join(" | ")));
        }
        out.trim_end().to_string()
    }
}

impl TableFormatter for PlainFormatter {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn format(&self, table: &SummaryTable) -> Result<String, FormatError> {
        Ok(self.render(table))
    }
}

/// Render with the grid formatter, falling back to the plain one
pub fn render_table(table: &SummaryTable) -> String {
    render_with(&GridFormatter, table)
}

pub fn render_with(primary: &dyn TableFormatter, table: &SummaryTable) -> String {
    match primary.format(table) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(
                "{} formatter failed for '{}' ({}), using plain table",
                primary.name(),
                table.title,
                e
            );
            PlainFormatter.render(table)
        }
    }
}

fn validate(table: &SummaryTable) -> Result<(), FormatError> {
    let expected = table.columns.len();
    for row in &table.rows {
        if row.cells.len() != expected {
            return Err(FormatError::Ragged {
                row: row.label.clone(),
                found: row.cells.len(),
                expected,
            });
        }
        let unsafe_text = std::iter::once(row.label.clone())
            .chain(row.cells.iter().map(|c| c.render()))
            .any(|s| s.contains('\n') || s.contains('|'));
        if unsafe_text {
            return Err(FormatError::UnsafeCell {
                row: row.label.clone(),
            });
        }
    }
    Ok(())
}

fn sanitize(s: &str) -> String {
    s.replace('\n', " ").replace('|', "\\|")
}
