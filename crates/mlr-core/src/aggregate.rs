//! Per-group cost and revenue totals, restricted to contract periods.
//!
//! Every aggregate has the shape `{groupname, total}`.

use std::time::Instant;

use mlr_model::columns::{
    AMOUNT, APPROVED_AMOUNT, DESCRIPTION, ENCOUNTER_DATE_FROM, FROM, GRANTED, GROUP_ID,
    GROUPNAME, NHIS_GROUP_ID, REQUEST_DATE, TOTAL,
};
use mlr_model::{EngineConfig, Result};
use polars::prelude::*;
use tracing::debug;

use crate::frame_utils::{left_ordered, stable_order_descending};
use crate::normalize;
use crate::stage::StageResultExt;
use crate::temporal::{ValidityWindow, filter_within_intervals};

const PA_STAGE: &str = "pa_aggregation";
const CLAIMS_STAGE: &str = "claims_aggregation";
const DEBIT_STAGE: &str = "debit_aggregation";

fn sum_per_group(filtered: LazyFrame, amount: &str) -> LazyFrame {
    filtered
        .group_by_stable([col(GROUPNAME)])
        .agg([col(amount).sum().alias(TOTAL)])
}

fn log_aggregate(stage: &str, df: &DataFrame, start: Instant) {
    debug!(
        stage,
        groups = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "aggregate ready"
    );
}

/// Granted pre-authorization amounts per group within its contract period.
///
/// Groups keep the order in which they first appear; the result is not
/// ranked.
pub fn aggregate_pre_authorizations(
    pre_authorizations: &DataFrame,
    contracts: &DataFrame,
) -> Result<DataFrame> {
    let start = Instant::now();
    let filtered = filter_within_intervals(
        normalize::pre_authorizations(pre_authorizations),
        REQUEST_DATE,
        normalize::contract_periods(contracts),
        ValidityWindow::CONTRACT,
    );
    let totals = sum_per_group(filtered, GRANTED)
        .collect()
        .in_stage(PA_STAGE)?;
    log_aggregate(PA_STAGE, &totals, start);
    Ok(totals)
}

/// Approved claim amounts per group, ranked by total descending.
///
/// Claims whose `nhisgroupid` has no entry in the group directory are
/// dropped before the contract filter.
pub fn aggregate_claims(
    claims: &DataFrame,
    directory: &DataFrame,
    contracts: &DataFrame,
) -> Result<DataFrame> {
    let start = Instant::now();
    let resolved = normalize::claims(claims).join(
        normalize::group_names_by_text_id(directory),
        [col(NHIS_GROUP_ID)],
        [col(GROUP_ID)],
        left_ordered(JoinType::Inner),
    );
    let filtered = filter_within_intervals(
        resolved,
        ENCOUNTER_DATE_FROM,
        normalize::contract_periods(contracts),
        ValidityWindow::CONTRACT,
    );
    let totals = sum_per_group(filtered, APPROVED_AMOUNT)
        .sort([TOTAL], stable_order_descending())
        .collect()
        .in_stage(CLAIMS_STAGE)?;
    log_aggregate(CLAIMS_STAGE, &totals, start);
    Ok(totals)
}

/// Debit notes that count as premium revenue.
///
/// Rows whose description contains the pass-through marker in any case are
/// removed; rows without a description are kept.
pub fn current_debit_notes(debit_notes: &DataFrame, config: &EngineConfig) -> LazyFrame {
    let marker = config.pass_through_key();
    let is_pass_through = col(DESCRIPTION)
        .str()
        .to_lowercase()
        .str()
        .contains_literal(lit(marker))
        .fill_null(lit(false));
    normalize::debit_notes(debit_notes).filter(is_pass_through.not())
}

/// Premium revenue per group within its contract period, ranked descending.
pub fn aggregate_debit_notes(
    debit_notes: &DataFrame,
    contracts: &DataFrame,
    config: &EngineConfig,
) -> Result<DataFrame> {
    let start = Instant::now();
    let filtered = filter_within_intervals(
        current_debit_notes(debit_notes, config),
        FROM,
        normalize::contract_periods(contracts),
        ValidityWindow::CONTRACT,
    );
    let totals = sum_per_group(filtered, AMOUNT)
        .sort([TOTAL], stable_order_descending())
        .collect()
        .in_stage(DEBIT_STAGE)?;
    log_aggregate(DEBIT_STAGE, &totals, start);
    Ok(totals)
}
