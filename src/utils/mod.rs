//! Console output helpers

mod progress;
mod styling;

pub use progress::*;
pub use styling::*;
