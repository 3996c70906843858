//! Command-line argument definitions using clap

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{default_data_home, DatasetSource, DEFAULT_DATASET_URL};

/// Diamond EDA - summary statistics, six charts and a markdown report for the diamonds dataset
#[derive(Parser, Debug)]
#[command(name = "diamond-eda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory the chart images are written to (created if absent)
    #[arg(long, default_value = "images")]
    pub image_dir: PathBuf,

    /// Markdown report path
    #[arg(long, default_value = "analysis.md")]
    pub report: PathBuf,

    /// Dataset cache directory.
    /// Defaults to ~/seaborn-data so an existing seaborn cache is reused.
    #[arg(long)]
    pub data_home: Option<PathBuf>,

    /// Where to download diamonds.csv from when it is not cached
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub dataset_url: String,

    /// Ignore the cached copy and download the dataset again
    #[arg(long, default_value = "false")]
    pub refresh: bool,

    /// Also write every summary table to this JSON file (written before the report)
    #[arg(long)]
    pub stats_json: Option<PathBuf>,

    /// Number of leading rows shown in the report's sample table
    #[arg(long, default_value = "5", value_parser = validate_sample_rows)]
    pub sample_rows: usize,
}

/// Resolved run settings
#[derive(Debug, Clone)]
pub struct EdaConfig {
    pub image_dir: PathBuf,
    pub report_path: PathBuf,
    pub source: DatasetSource,
    pub stats_json: Option<PathBuf>,
    pub sample_rows: usize,
}

impl Cli {
    pub fn into_config(self) -> Result<EdaConfig> {
        let data_home = match self.data_home {
            Some(dir) => dir,
            None => default_data_home()
                .context("Could not locate a home directory; pass --data-home explicitly")?,
        };

        Ok(EdaConfig {
            image_dir: self.image_dir,
            report_path: self.report,
            source: DatasetSource {
                url: self.dataset_url,
                data_home,
                refresh: self.refresh,
            },
            stats_json: self.stats_json,
            sample_rows: self.sample_rows,
        })
    }
}

/// Validator for sample_rows parameter
fn validate_sample_rows(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid row count", s))?;

    if value == 0 {
        Err("sample_rows must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
