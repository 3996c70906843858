//! CLI module - argument parsing and run configuration

mod args;

pub use args::{Cli, EdaConfig};
