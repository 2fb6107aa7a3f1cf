//! Output formatting for experiment analyses.
//!
//! - Terminal: Human-readable report with colors and box drawing
//! - JSON: Machine-readable serialization

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_analysis, format_lift_histogram};
