use std::path::PathBuf;

use mlr_core::MlrReport;
use mlr_model::EngineConfig;

/// Everything the summary printer needs from one `mlr run`.
#[derive(Debug)]
pub struct RunOutcome {
    pub data_dir: PathBuf,
    pub snapshot_id: String,
    pub config: EngineConfig,
    pub report: MlrReport,
    /// `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}
