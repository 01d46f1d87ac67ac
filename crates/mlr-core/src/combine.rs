//! Revenue and cost per group merged into MLR tables.
//!
//! The full join keeps groups present on either side. Missing amounts stay
//! null in the output; only the ratio treats them as zero, so a group with
//! cost but no revenue gets an infinite ratio and one with neither gets NaN.

use std::time::Instant;

use mlr_model::columns::{
    CLAIMS_TOTAL, COMMISSION, DEBIT_TOTAL, GROUPNAME, MLR_CLAIMS, MLR_PA, PA_LOADED, PA_TOTAL,
    TOTAL,
};
use mlr_model::{EngineConfig, Result};
use polars::prelude::*;
use tracing::debug;

use crate::frame_utils::{round_columns, stable_order};
use crate::stage::StageResultExt;

const PA_STAGE: &str = "pa_combination";
const CLAIMS_STAGE: &str = "claims_combination";

/// Full join of revenue and one cost aggregate on `groupname`.
fn merge_with_revenue(debit: &DataFrame, cost: &DataFrame, cost_column: &str) -> LazyFrame {
    let revenue = debit
        .clone()
        .lazy()
        .select([col(GROUPNAME), col(TOTAL).alias(DEBIT_TOTAL)]);
    let cost = cost
        .clone()
        .lazy()
        .select([col(GROUPNAME), col(TOTAL).alias(cost_column)]);
    revenue.join(
        cost,
        [col(GROUPNAME)],
        [col(GROUPNAME)],
        JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
    )
}

/// `(numerator + commission) / debit_total * 100` with nulls read as zero.
pub fn mlr_ratio(numerator: &str) -> Expr {
    (col(numerator).fill_null(lit(0.0)) + col(COMMISSION).fill_null(lit(0.0)))
        / col(DEBIT_TOTAL).fill_null(lit(0.0))
        * lit(100.0)
}

fn commission(config: &EngineConfig) -> Expr {
    (col(DEBIT_TOTAL) * lit(config.commission_rate)).alias(COMMISSION)
}

/// Round the derived amounts, compute the ratio from the rounded values,
/// then round the ratio.
fn finish(
    merged: DataFrame,
    amounts: &[&str],
    numerator: &str,
    mlr_column: &str,
    output: &[&str],
    config: &EngineConfig,
    stage: &str,
) -> Result<DataFrame> {
    let decimals = config.ratio_decimals;
    let rounded = round_columns(merged, amounts, decimals).in_stage(stage)?;
    let selection: Vec<Expr> = output.iter().map(|name| col(*name)).collect();
    let with_ratio = rounded
        .lazy()
        .with_column(mlr_ratio(numerator).alias(mlr_column))
        .select(selection)
        .sort([GROUPNAME], stable_order())
        .collect()
        .in_stage(stage)?;
    round_columns(with_ratio, &[mlr_column], decimals).in_stage(stage)
}

/// PA-based MLR: `{groupname, debit_total, pa_total, PA40%, commission, MLR(PA) (%)}`.
pub fn combine_pa_mlr(
    debit_by_group: &DataFrame,
    pa_by_group: &DataFrame,
    config: &EngineConfig,
) -> Result<DataFrame> {
    let start = Instant::now();
    let merged = merge_with_revenue(debit_by_group, pa_by_group, PA_TOTAL)
        .with_columns([
            commission(config),
            (col(PA_TOTAL) * lit(config.pa_loading_factor)).alias(PA_LOADED),
        ])
        .collect()
        .in_stage(PA_STAGE)?;
    let combined = finish(
        merged,
        &[COMMISSION, PA_LOADED],
        PA_LOADED,
        MLR_PA,
        &[GROUPNAME, DEBIT_TOTAL, PA_TOTAL, PA_LOADED, COMMISSION, MLR_PA],
        config,
        PA_STAGE,
    )?;
    debug!(
        groups = combined.height(),
        duration_ms = start.elapsed().as_millis(),
        "PA MLR combined"
    );
    Ok(combined)
}

/// Claims-based MLR: `{groupname, debit_total, claims_total, commission, MLR(CLAIMS) (%)}`.
pub fn combine_claims_mlr(
    debit_by_group: &DataFrame,
    claims_by_group: &DataFrame,
    config: &EngineConfig,
) -> Result<DataFrame> {
    let start = Instant::now();
    let merged = merge_with_revenue(debit_by_group, claims_by_group, CLAIMS_TOTAL)
        .with_column(commission(config))
        .collect()
        .in_stage(CLAIMS_STAGE)?;
    let combined = finish(
        merged,
        &[COMMISSION],
        CLAIMS_TOTAL,
        MLR_CLAIMS,
        &[GROUPNAME, DEBIT_TOTAL, CLAIMS_TOTAL, COMMISSION, MLR_CLAIMS],
        config,
        CLAIMS_STAGE,
    )?;
    debug!(
        groups = combined.height(),
        duration_ms = start.elapsed().as_millis(),
        "claims MLR combined"
    );
    Ok(combined)
}
