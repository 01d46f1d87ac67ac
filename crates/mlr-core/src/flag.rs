//! Groups whose MLR exceeds the risk threshold.

use mlr_model::columns::{GROUPNAME, MLR_CLAIMS, MLR_PA};
use mlr_model::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::stage::StageResultExt;

const STAGE: &str = "risk_flags";

/// Flagged group names per metric, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlaggedGroups {
    pub pa: Vec<String>,
    pub claims: Vec<String>,
}

impl FlaggedGroups {
    pub fn is_empty(&self) -> bool {
        self.pa.is_empty() && self.claims.is_empty()
    }
}

/// Group names whose `mlr_column` is strictly above `threshold`.
///
/// NaN ratios and null group names are never flagged. An infinite ratio is
/// above any finite threshold. A table without rows yields no groups.
pub fn flag_groups(table: &DataFrame, mlr_column: &str, threshold: f64) -> Result<Vec<String>> {
    if table.height() == 0 {
        return Ok(Vec::new());
    }
    let ratios = table
        .column(mlr_column)
        .in_stage(STAGE)?
        .cast(&DataType::Float64)
        .in_stage(STAGE)?;
    let names = table
        .column(GROUPNAME)
        .in_stage(STAGE)?
        .cast(&DataType::String)
        .in_stage(STAGE)?;
    // Polars orders NaN above every number; Rust's `>` is false for NaN.
    let flagged = names
        .str()
        .in_stage(STAGE)?
        .into_iter()
        .zip(ratios.f64().in_stage(STAGE)?)
        .filter_map(|(name, ratio)| match (name, ratio) {
            (Some(name), Some(ratio)) if ratio > threshold => Some(name.to_string()),
            _ => None,
        })
        .collect();
    Ok(flagged)
}

/// Flag both combined MLR tables against one threshold.
pub fn flag_high_mlr(
    pa_mlr: &DataFrame,
    claims_mlr: &DataFrame,
    threshold: f64,
) -> Result<FlaggedGroups> {
    Ok(FlaggedGroups {
        pa: flag_groups(pa_mlr, MLR_PA, threshold)?,
        claims: flag_groups(claims_mlr, MLR_CLAIMS, threshold)?,
    })
}
