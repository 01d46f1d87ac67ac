//! Engine configuration from file and flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use mlr_model::EngineConfig;

/// Read a JSON configuration, or the defaults when no path is given.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Apply command-line overrides on top of a loaded configuration.
pub fn apply_overrides(
    mut config: EngineConfig,
    threshold: Option<f64>,
    product_line: Option<&str>,
) -> Result<EngineConfig> {
    if let Some(threshold) = threshold {
        ensure!(threshold.is_finite(), "threshold must be a finite number");
        config = config.with_risk_threshold(threshold);
    }
    if let Some(name) = product_line {
        ensure!(!name.trim().is_empty(), "product line must not be empty");
        config = config.with_retail_product_line(name);
    }
    Ok(config)
}
