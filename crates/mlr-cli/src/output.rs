//! Result files: one CSV per result table plus a JSON run summary.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mlr_core::{DataQualityReport, FlaggedGroups, MlrReport, StageFailure};
use mlr_model::EngineConfig;
use polars::prelude::{CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series};
use serde::Serialize;
use tracing::{debug, info};

use crate::render::{flagged_headers, flagged_rows};

pub const PA_MLR_FILE: &str = "pa_mlr.csv";
pub const CLAIMS_MLR_FILE: &str = "claims_mlr.csv";
pub const RETAIL_MEMBER_COST_FILE: &str = "retail_member_cost.csv";
pub const RETAIL_PLAN_SUMMARY_FILE: &str = "retail_plan_summary.csv";
pub const FLAGGED_GROUPS_FILE: &str = "flagged_groups.csv";
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Row counts of the result tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultCounts {
    pub pa_groups: usize,
    pub claims_groups: usize,
    pub retail_member_rows: usize,
    pub retail_plans: usize,
    pub retail_active_members: usize,
}

impl ResultCounts {
    pub fn of(report: &MlrReport) -> Self {
        Self {
            pa_groups: report.pa_mlr.height(),
            claims_groups: report.claims_mlr.height(),
            retail_member_rows: report.retail.member_costs.height(),
            retail_plans: report.retail.plan_summary.height(),
            retail_active_members: report.retail.active_members.height(),
        }
    }
}

/// Contents of `run_summary.json`.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub snapshot_id: &'a str,
    pub config: &'a EngineConfig,
    pub counts: ResultCounts,
    pub flagged: &'a FlaggedGroups,
    pub data_quality: &'a DataQualityReport,
    pub failures: &'a [StageFailure],
    /// File names written next to the summary.
    pub files: Vec<String>,
}

/// The flagged lists as a two-column frame padded with empty strings.
pub fn flagged_frame(flagged: &FlaggedGroups, threshold: f64) -> PolarsResult<DataFrame> {
    let [pa_header, claims_header] = flagged_headers(threshold);
    let rows = flagged_rows(flagged);
    let pa: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
    let claims: Vec<&str> = rows.iter().map(|row| row[1].as_str()).collect();
    DataFrame::new(vec![
        Series::new(pa_header.into(), pa).into_column(),
        Series::new(claims_header.into(), claims).into_column(),
    ])
}

/// Write `df` as CSV with a header row.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    // A failed stage leaves a frame without columns; its file stays empty.
    if df.width() == 0 {
        return Ok(());
    }
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}

/// Write every result file into `dir`, creating it if needed.
///
/// Returns the written paths, summary last.
pub fn write_results(
    report: &MlrReport,
    config: &EngineConfig,
    snapshot_id: &str,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;

    let flagged = flagged_frame(&report.flagged, config.risk_threshold)
        .context("build flagged group table")?;
    let tables: [(&str, &DataFrame); 5] = [
        (PA_MLR_FILE, &report.pa_mlr),
        (CLAIMS_MLR_FILE, &report.claims_mlr),
        (RETAIL_MEMBER_COST_FILE, &report.retail.member_costs),
        (RETAIL_PLAN_SUMMARY_FILE, &report.retail.plan_summary),
        (FLAGGED_GROUPS_FILE, &flagged),
    ];

    let mut written = Vec::with_capacity(tables.len() + 1);
    for (name, df) in tables {
        let path = dir.join(name);
        write_csv(df, &path)?;
        written.push(path);
    }

    let summary = RunSummary {
        snapshot_id,
        config,
        counts: ResultCounts::of(report),
        flagged: &report.flagged,
        data_quality: &report.quality,
        failures: &report.failures,
        files: tables.iter().map(|(name, _)| (*name).to_string()).collect(),
    };
    let summary_path = dir.join(RUN_SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&summary).context("serialize run summary")?;
    fs::write(&summary_path, json)
        .with_context(|| format!("write {}", summary_path.display()))?;
    written.push(summary_path);

    info!(dir = %dir.display(), files = written.len(), "results written");
    Ok(written)
}
