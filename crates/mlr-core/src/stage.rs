//! Attaching stage names to Polars failures.

use mlr_model::{MlrError, Result};
use polars::prelude::PolarsResult;

/// Converts a Polars result into an engine result tagged with its stage.
pub trait StageResultExt<T> {
    fn in_stage(self, stage: &str) -> Result<T>;
}

impl<T> StageResultExt<T> for PolarsResult<T> {
    fn in_stage(self, stage: &str) -> Result<T> {
        self.map_err(|err| MlrError::computation(stage, err.to_string()))
    }
}
