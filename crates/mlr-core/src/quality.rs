//! Data-quality diagnostics reported alongside the result tables.
//!
//! Nothing here alters a result; anomalies are counted and named so the
//! operator can judge the ratios.

use mlr_model::columns::{DEBIT_TOTAL, GROUPNAME, MLR_CLAIMS, MLR_PA};
use mlr_model::Result;
use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::frame_utils::{count_non_finite, count_nulls, stable_order};
use crate::normalize;
use crate::stage::StageResultExt;

const STAGE: &str = "data_quality";
const PERIODS: &str = "periods";

/// Anomalies of one metric table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricQuality {
    /// Groups with cost but no revenue (null `debit_total`).
    pub groups_without_revenue: usize,
    /// Infinite or NaN ratios.
    pub non_finite_ratios: usize,
}

impl MetricQuality {
    pub fn of(table: &DataFrame, mlr_column: &str) -> Self {
        Self {
            groups_without_revenue: count_nulls(table, DEBIT_TOTAL),
            non_finite_ratios: count_non_finite(table, mlr_column),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQualityReport {
    /// Groups with more than one contract period; their transactions may be
    /// counted once per overlapping period.
    pub multi_period_groups: Vec<String>,
    pub pa: MetricQuality,
    pub claims: MetricQuality,
}

impl DataQualityReport {
    pub fn has_anomalies(&self) -> bool {
        !self.multi_period_groups.is_empty()
            || self.pa != MetricQuality::default()
            || self.claims != MetricQuality::default()
    }
}

/// Group names appearing in more than one contract period, sorted.
pub fn groups_with_multiple_periods(contracts: &DataFrame) -> Result<Vec<String>> {
    let repeated = normalize::contract_periods(contracts)
        .filter(col(GROUPNAME).is_not_null())
        .group_by([col(GROUPNAME)])
        .agg([len().alias(PERIODS)])
        .filter(col(PERIODS).gt(lit(1)))
        .sort([GROUPNAME], stable_order())
        .collect()
        .in_stage(STAGE)?;
    let names = repeated
        .column(GROUPNAME)
        .in_stage(STAGE)?
        .str()
        .in_stage(STAGE)?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(names)
}

/// Build the report and log each anomaly at `warn`.
pub fn assess(
    contracts: &DataFrame,
    pa_mlr: &DataFrame,
    claims_mlr: &DataFrame,
) -> Result<DataQualityReport> {
    let report = DataQualityReport {
        multi_period_groups: groups_with_multiple_periods(contracts)?,
        pa: MetricQuality::of(pa_mlr, MLR_PA),
        claims: MetricQuality::of(claims_mlr, MLR_CLAIMS),
    };
    if !report.multi_period_groups.is_empty() {
        warn!(
            groups = ?report.multi_period_groups,
            "groups with several contract periods; transactions may be counted more than once"
        );
    }
    for (metric, quality) in [("pa", report.pa), ("claims", report.claims)] {
        if quality.groups_without_revenue > 0 {
            warn!(
                metric,
                groups = quality.groups_without_revenue,
                "groups with cost but no revenue"
            );
        }
        if quality.non_finite_ratios > 0 {
            warn!(metric, rows = quality.non_finite_ratios, "non-finite MLR values");
        }
    }
    Ok(report)
}
