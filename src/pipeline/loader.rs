//! Dataset provisioning for the diamonds reference dataset
//!
//! The CSV is cached under a data home directory using the same layout as
//! the seaborn-data cache, so a previously downloaded copy is reused.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use polars::prelude::*;

use super::table::DiamondTable;
use crate::error::EdaError;

pub const DATASET_FILE: &str = "diamonds.csv";
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/mwaskom/seaborn-data/master/diamonds.csv";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the dataset comes from and where it is cached
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub url: String,
    pub data_home: PathBuf,
    /// Ignore an existing cached copy
    pub refresh: bool,
}

impl DatasetSource {
    pub fn cache_path(&self) -> PathBuf {
        self.data_home.join(DATASET_FILE)
    }
}

/// Default cache directory, `$HOME/seaborn-data`
pub fn default_data_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("seaborn-data"))
}

/// Fetch (or reuse) the cached CSV and parse it into a table
pub fn load_diamonds(source: &DatasetSource) -> Result<DiamondTable> {
    let path = ensure_cached(source)?;
    read_diamonds_csv(&path)
}

/// Make sure the cached CSV exists, downloading it when needed
pub fn ensure_cached(source: &DatasetSource) -> Result<PathBuf, EdaError> {
    let path = source.cache_path();
    if path.is_file() && !source.refresh {
        log::debug!("using cached dataset at {}", path.display());
        return Ok(path);
    }

    log::info!("downloading {}", source.url);
    let bytes = download(&source.url)?;
    log::debug!("downloaded {} bytes", bytes.len());

    fs::create_dir_all(&source.data_home).map_err(|e| EdaError::io(&source.data_home, e))?;

    // Write beside the target and rename so an interrupted run leaves no partial cache
    let partial = path.with_extension("csv.part");
    fs::write(&partial, &bytes).map_err(|e| EdaError::io(&partial, e))?;
    fs::rename(&partial, &path).map_err(|e| EdaError::io(&path, e))?;

    Ok(path)
}

fn download(url: &str) -> Result<Vec<u8>, EdaError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| EdaError::dataset(url, e))?;

    let response = client.get(url).send().map_err(|e| EdaError::dataset(url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(EdaError::dataset(url, format!("HTTP status {}", status)));
    }

    let bytes = response.bytes().map_err(|e| EdaError::dataset(url, e))?;
    Ok(bytes.to_vec())
}

/// Parse a diamonds CSV into a table
pub fn read_diamonds_csv(path: &Path) -> Result<DiamondTable> {
    let source_desc = path.display().to_string();

    let frame = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| EdaError::dataset(&source_desc, e))?;

    if frame.height() == 0 {
        return Err(EdaError::dataset(&source_desc, "file contains no rows").into());
    }

    DiamondTable::new(frame)
}

/// Estimated in-memory size of the table in megabytes
pub fn estimated_memory_mb(table: &DiamondTable) -> f64 {
    table.frame().estimated_size() as f64 / (1024.0 * 1024.0)
}
