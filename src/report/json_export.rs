//! JSON export of every summary table

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::table::SummaryTable;

/// Metadata about the analysis run
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Tool version
    pub version: String,
    /// Where the dataset was fetched from
    pub dataset_url: String,
    pub rows: usize,
    pub columns: usize,
}

/// Complete export: metadata plus tables in report order
#[derive(Debug, Serialize)]
pub struct StatsExport<'a> {
    pub metadata: ExportMetadata,
    pub tables: Vec<&'a SummaryTable>,
}

/// Write `tables` to `output_path` as pretty-printed JSON
pub fn export_tables_json(
    output_path: &Path,
    metadata: ExportMetadata,
    tables: Vec<&SummaryTable>,
) -> Result<()> {
    let export = StatsExport { metadata, tables };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize summary tables to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write summary tables to {}", output_path.display()))?;

    Ok(())
}
