//! CLI library components for the MLR report.

pub mod logging;
pub mod output;
pub mod render;
pub mod settings;
pub mod types;
