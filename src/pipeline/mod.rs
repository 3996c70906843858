//! Pipeline module - loading, derived columns and statistics

pub mod binning;
pub mod capabilities;
pub mod correlation;
pub mod loader;
pub mod pivots;
pub mod schema;
pub mod stats;
pub mod table;

pub use binning::{cut_equal_width, Binning};
pub use capabilities::{check_capabilities, diagnostic};
pub use correlation::*;
pub use loader::*;
pub use stats::*;
pub use table::DiamondTable;
