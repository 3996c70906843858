//! Report module - summary tables, markdown assembly and output

pub mod document;
pub mod json_export;
pub mod markdown;
pub mod summary;
pub mod table;
pub mod writer;

pub use document::*;
pub use json_export::*;
pub use markdown::*;
pub use summary::*;
pub use table::*;
pub use writer::*;
