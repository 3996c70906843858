//! Diamond EDA: exploratory analysis of the diamonds reference dataset
//!
//! Loads the dataset, computes summary statistics, renders six charts
//! with paired cross-tabulations and writes everything to a markdown report.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
pub mod viz;
