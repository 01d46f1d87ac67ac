//! Retail product line: members, plan premiums and pre-authorization cost.
//!
//! Retail enrollees are judged against their own enrollment window rather
//! than a group contract period.

use std::time::Instant;

use mlr_ingest::SourceTables;
use mlr_model::columns::{
    COUNT_OF_FAMILY, COUNT_OF_INDIVIDUAL, EFFECTIVE_DATE, FAMILY_PRICE, GRANTED, GROUP_ID,
    GROUPNAME, IID, INDIVIDUAL_PRICE, IS_CURRENT, LEGACY_CODE, MEMBER_ID, PLAN_ID, PLAN_NAME,
    PREMIUM, REQUEST_DATE, TERMINATION_DATE, TOTAL_COST, TOTAL_PREMIUM,
};
use mlr_model::{EngineConfig, Result};
use polars::prelude::*;
use tracing::debug;

use crate::frame_utils::{eq_ignore_case, left_ordered, stable_order};
use crate::normalize;
use crate::stage::StageResultExt;
use crate::temporal::{ValidityWindow, filter_within_intervals};

const STAGE: &str = "retail_mlr";

/// Literal value of `iscurrent` marking a member's current plan.
const CURRENT_FLAG: &str = "true";

/// Retail result tables.
#[derive(Debug, Clone, Default)]
pub struct RetailMlr {
    /// `{iid, planname, total_cost}` per member and plan.
    pub member_costs: DataFrame,
    /// `{planname, total_premium, total_cost}`; `total_cost` is null for
    /// plans without in-window requests.
    pub plan_summary: DataFrame,
    /// `{legacycode, memberid, planid, effectivedate, terminationdate}` for
    /// enrollees whose current plan belongs to the product line.
    pub active_members: DataFrame,
}

fn left() -> JoinArgs {
    left_ordered(JoinType::Left)
}

/// Resolve the retail tables for the configured product line.
pub fn resolve_retail_mlr(tables: &SourceTables, config: &EngineConfig) -> Result<RetailMlr> {
    let start = Instant::now();
    let product_line = config.product_line_key();

    let current_plans = normalize::member_plans(&tables.member_plan)
        .filter(col(IS_CURRENT).eq(lit(CURRENT_FLAG)))
        .select([col(MEMBER_ID), col(PLAN_ID)]);

    let retail_plans = normalize::group_plans(&tables.group_plan)
        .join(
            normalize::group_names_by_integer_id(&tables.group_directory),
            [col(GROUP_ID)],
            [col(GROUP_ID)],
            left(),
        )
        .filter(eq_ignore_case(GROUPNAME, &product_line));

    let retail_plan_ids = retail_plans
        .clone()
        .select([col(PLAN_ID)])
        .unique_stable(None, UniqueKeepStrategy::First);

    // One row per enrollee and current plan; both request joins below read
    // this frame, so a member with several current plans fans out per plan.
    let enrolled = normalize::enrollees(&tables.active_enrollee).join(
        current_plans.clone(),
        [col(MEMBER_ID)],
        [col(MEMBER_ID)],
        left(),
    );

    let active_members = enrolled
        .clone()
        .join(
            retail_plan_ids,
            [col(PLAN_ID)],
            [col(PLAN_ID)],
            left_ordered(JoinType::Inner),
        )
        .select([
            col(LEGACY_CODE),
            col(MEMBER_ID),
            col(PLAN_ID),
            col(EFFECTIVE_DATE),
            col(TERMINATION_DATE),
        ])
        .sort([LEGACY_CODE, PLAN_ID], stable_order())
        .collect()
        .in_stage(STAGE)?;

    let premium_by_plan = retail_plans
        .join(
            normalize::plans(&tables.plan),
            [col(PLAN_ID)],
            [col(PLAN_ID)],
            left(),
        )
        .with_column(
            (col(INDIVIDUAL_PRICE) * col(COUNT_OF_INDIVIDUAL)
                + col(COUNT_OF_FAMILY) * col(FAMILY_PRICE))
            .alias(PREMIUM),
        )
        .group_by_stable([col(PLAN_NAME)])
        .agg([col(PREMIUM).sum().alias(TOTAL_PREMIUM)]);

    // Request -> member -> current plan, then the product-line filter on the
    // request's own group.
    let requests = normalize::pre_authorizations(&tables.pre_authorization)
        .join(
            enrolled.clone().select([col(LEGACY_CODE), col(MEMBER_ID)]),
            [col(IID)],
            [col(LEGACY_CODE)],
            left(),
        )
        .join(current_plans, [col(MEMBER_ID)], [col(MEMBER_ID)], left())
        .filter(eq_ignore_case(GROUPNAME, &product_line))
        .join(
            normalize::plans(&tables.plan),
            [col(PLAN_ID)],
            [col(PLAN_ID)],
            left(),
        );

    // Attaching the enrollment window and keeping in-window requests drops
    // requests without a window, the same as a left join then filter.
    let in_window = filter_within_intervals(
        requests,
        REQUEST_DATE,
        enrolled.select([
            col(LEGACY_CODE),
            col(EFFECTIVE_DATE),
            col(TERMINATION_DATE),
        ]),
        ValidityWindow::ENROLLMENT,
    );

    let member_costs = in_window
        .group_by_stable([col(IID), col(PLAN_NAME)])
        .agg([col(GRANTED).sum().alias(TOTAL_COST)])
        .select([col(IID), col(PLAN_NAME), col(TOTAL_COST)])
        .sort([PLAN_NAME, IID], stable_order())
        .collect()
        .in_stage(STAGE)?;

    let cost_by_plan = member_costs
        .clone()
        .lazy()
        .group_by_stable([col(PLAN_NAME)])
        .agg([col(TOTAL_COST).sum()])
        .with_column(col(PLAN_NAME).cast(DataType::String));

    let plan_summary = premium_by_plan
        .with_column(col(PLAN_NAME).cast(DataType::String))
        .join(cost_by_plan, [col(PLAN_NAME)], [col(PLAN_NAME)], left())
        .select([col(PLAN_NAME), col(TOTAL_PREMIUM), col(TOTAL_COST)])
        .sort([PLAN_NAME], stable_order())
        .collect()
        .in_stage(STAGE)?;

    debug!(
        active_members = active_members.height(),
        member_rows = member_costs.height(),
        plans = plan_summary.height(),
        duration_ms = start.elapsed().as_millis(),
        "retail MLR resolved"
    );

    Ok(RetailMlr {
        member_costs,
        plan_summary,
        active_members,
    })
}
