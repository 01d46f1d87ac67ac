//! One computation run over a source snapshot.
//!
//! Schema validation fails fast. After that, each pipeline is contained:
//! a failure leaves empty tables for its own outputs, is recorded in
//! [`MlrReport::failures`], and the other pipelines still run.

use std::fmt;
use std::time::Instant;

use mlr_ingest::SourceTables;
use mlr_model::{EngineConfig, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{error, info, info_span};

use crate::aggregate::{aggregate_claims, aggregate_debit_notes, aggregate_pre_authorizations};
use crate::combine::{combine_claims_mlr, combine_pa_mlr};
use crate::flag::{FlaggedGroups, flag_high_mlr};
use crate::quality::{DataQualityReport, assess};
use crate::retail::{RetailMlr, resolve_retail_mlr};
use crate::schema::validate_sources;

/// Containment unit of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Revenue per group, shared by both group metrics.
    DebitAggregation,
    PaMlr,
    ClaimsMlr,
    RetailMlr,
    RiskFlags,
    DataQuality,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DebitAggregation => "debit_aggregation",
            Self::PaMlr => "pa_mlr",
            Self::ClaimsMlr => "claims_mlr",
            Self::RetailMlr => "retail_mlr",
            Self::RiskFlags => "risk_flags",
            Self::DataQuality => "data_quality",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contained pipeline failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

/// Everything one run hands to presentation.
#[derive(Debug, Clone, Default)]
pub struct MlrReport {
    pub pa_mlr: DataFrame,
    pub claims_mlr: DataFrame,
    pub retail: RetailMlr,
    pub flagged: FlaggedGroups,
    pub quality: DataQualityReport,
    pub failures: Vec<StageFailure>,
}

impl MlrReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, stage: Stage) -> bool {
        self.failures.iter().any(|failure| failure.stage == stage)
    }
}

/// Stateless MLR engine; a run is a function of its snapshot and config.
#[derive(Debug, Clone, Default)]
pub struct MlrEngine {
    config: EngineConfig,
}

impl MlrEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the snapshot, then compute every result table.
    ///
    /// Returns `Err` only when validation fails; computation failures are
    /// contained in the report.
    pub fn run(&self, tables: &SourceTables) -> Result<MlrReport> {
        let span = info_span!("mlr_run");
        let _guard = span.enter();
        let start = Instant::now();

        validate_sources(tables)?;

        let mut failures = Vec::new();
        let config = &self.config;

        let debit = contain(Stage::DebitAggregation, &mut failures, || {
            aggregate_debit_notes(&tables.debit_note, &tables.group_contract, config)
        });

        let pa_mlr = debit
            .as_ref()
            .and_then(|debit| {
                contain(Stage::PaMlr, &mut failures, || {
                    let pa = aggregate_pre_authorizations(
                        &tables.pre_authorization,
                        &tables.group_contract,
                    )?;
                    combine_pa_mlr(debit, &pa, config)
                })
            })
            .unwrap_or_default();

        let claims_mlr = debit
            .as_ref()
            .and_then(|debit| {
                contain(Stage::ClaimsMlr, &mut failures, || {
                    let claims = aggregate_claims(
                        &tables.claims,
                        &tables.group_directory,
                        &tables.group_contract,
                    )?;
                    combine_claims_mlr(debit, &claims, config)
                })
            })
            .unwrap_or_default();

        let retail = contain(Stage::RetailMlr, &mut failures, || {
            resolve_retail_mlr(tables, config)
        })
        .unwrap_or_default();

        let flagged = contain(Stage::RiskFlags, &mut failures, || {
            flag_high_mlr(&pa_mlr, &claims_mlr, config.risk_threshold)
        })
        .unwrap_or_default();

        let quality = contain(Stage::DataQuality, &mut failures, || {
            assess(&tables.group_contract, &pa_mlr, &claims_mlr)
        })
        .unwrap_or_default();

        info!(
            pa_groups = pa_mlr.height(),
            claims_groups = claims_mlr.height(),
            retail_plans = retail.plan_summary.height(),
            flagged_pa = flagged.pa.len(),
            flagged_claims = flagged.claims.len(),
            failures = failures.len(),
            duration_ms = start.elapsed().as_millis(),
            "MLR run complete"
        );

        Ok(MlrReport {
            pa_mlr,
            claims_mlr,
            retail,
            flagged,
            quality,
            failures,
        })
    }
}

/// Run one pipeline, recording its error instead of propagating it.
fn contain<T>(
    stage: Stage,
    failures: &mut Vec<StageFailure>,
    pipeline: impl FnOnce() -> Result<T>,
) -> Option<T> {
    let span = info_span!("stage", stage = stage.as_str());
    let _guard = span.enter();
    let start = Instant::now();
    match pipeline() {
        Ok(output) => {
            info!(duration_ms = start.elapsed().as_millis(), "stage complete");
            Some(output)
        }
        Err(err) => {
            error!(error = %err, "stage failed; its outputs are empty");
            failures.push(StageFailure {
                stage,
                message: err.to_string(),
            });
            None
        }
    }
}
