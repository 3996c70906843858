//! Error types for the analysis pipeline.
//!
//! Only the failure kinds a user can act on get their own variant. Anything
//! else travels as `anyhow::Error` with context attached at the call site.

use std::path::PathBuf;

use thiserror::Error;

/// A runtime component the pipeline needs but could not find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCapability {
    /// Human readable component name, e.g. `sans-serif font`
    pub name: &'static str,
    /// System package that provides it
    pub system_package: &'static str,
    /// conda-forge package that provides it
    pub env_package: &'static str,
}

/// Errors that can occur while producing the report.
#[derive(Debug, Error)]
pub enum EdaError {
    /// One or more required components are absent. All of them are listed.
    #[error("required component(s) not available: {}", names(.missing))]
    DependencyMissing { missing: Vec<MissingCapability> },

    /// The reference dataset could not be fetched, read or recognised.
    #[error("dataset unavailable from {source_desc}: {reason}")]
    DatasetUnavailable { source_desc: String, reason: String },

    /// A derived column was requested a second time.
    #[error("derived column '{0}' already exists")]
    DerivedColumnExists(String),

    /// A chart failed to draw or encode.
    #[error("failed to render chart '{chart}': {message}")]
    Render { chart: String, message: String },

    /// File system failure.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EdaError {
    pub fn dataset(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        EdaError::DatasetUnavailable {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }

    pub fn render(chart: impl Into<String>, err: impl std::fmt::Display) -> Self {
        EdaError::Render {
            chart: chart.into(),
            message: err.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EdaError::Io {
            path: path.into(),
            source,
        }
    }
}

fn names(missing: &[MissingCapability]) -> String {
    missing
        .iter()
        .map(|m| m.name)
        .collect::<Vec<_>>()
        .join(", ")
}
