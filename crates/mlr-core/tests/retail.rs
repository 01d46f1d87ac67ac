mod common;

use common::{
    Tables, assert_close, date, directory, enrollees, floats_of, group_plans, member_plans,
    plans, pre_authorizations, strings, value_for,
};
use mlr_core::retail::resolve_retail_mlr;
use mlr_model::columns::{IID, LEGACY_CODE, PLAN_ID, PLAN_NAME, TOTAL_COST, TOTAL_PREMIUM};
use mlr_model::{EngineConfig, TableKind};

fn retail_book() -> Tables {
    Tables::default()
        .with(
            TableKind::GroupDirectory,
            directory(&[(10, "Acme"), (20, "Family Scheme"), (30, "Family Plan")]),
        )
        .with(
            TableKind::GroupPlan,
            group_plans(&[
                (1, 20, 100.0, 250.0, 3, 2),
                (2, 20, 50.0, 0.0, 4, 0),
                (3, 30, 999.0, 999.0, 1, 1),
                (4, 20, 10.0, 0.0, 1, 0),
            ]),
        )
        .with(
            TableKind::Plan,
            plans(&[(1, "Gold"), (2, "Silver"), (3, "Basic"), (4, "Bronze")]),
        )
        .with(
            TableKind::ActiveEnrollee,
            enrollees(&[
                ("M-1", 1, date(2023, 1, 1), date(2023, 12, 31)),
                ("M-2", 2, date(2023, 1, 1), date(2023, 6, 30)),
                ("M-3", 3, date(2023, 1, 1), date(2023, 12, 31)),
                ("M-4", 4, date(2023, 1, 1), date(2023, 12, 31)),
            ]),
        )
        .with(
            TableKind::MemberPlan,
            member_plans(&[
                (1, 1, "true"),
                (1, 2, "false"),
                (2, 2, "true"),
                (3, 3, "true"),
                (4, 1, "false"),
            ]),
        )
        .with(
            TableKind::PreAuthorization,
            pre_authorizations(&[
                ("Family Scheme", date(2023, 3, 1), 100.0, "M-1"),
                ("FAMILY SCHEME", date(2023, 4, 1), 50.0, "M-1"),
                ("Family Scheme", date(2023, 8, 1), 70.0, "M-2"),
                ("Family Scheme", date(2023, 5, 1), 30.0, "M-2"),
                ("Family Plan", date(2023, 3, 1), 999.0, "M-3"),
                ("Acme", date(2023, 3, 1), 5.0, "M-1"),
            ]),
        )
}

#[test]
fn member_costs_follow_enrollment_windows() {
    let retail = resolve_retail_mlr(&retail_book().build(), &EngineConfig::default()).unwrap();

    let costs = &retail.member_costs;
    assert_eq!(
        strings(costs, PLAN_NAME),
        vec![Some("Gold".to_string()), Some("Silver".to_string())]
    );
    assert_eq!(
        strings(costs, IID),
        vec![Some("M-1".to_string()), Some("M-2".to_string())]
    );
    assert_eq!(floats_of(costs, TOTAL_COST), vec![Some(150.0), Some(30.0)]);
}

#[test]
fn plan_summary_merges_premium_and_cost() {
    let retail = resolve_retail_mlr(&retail_book().build(), &EngineConfig::default()).unwrap();

    let summary = &retail.plan_summary;
    assert_eq!(
        strings(summary, PLAN_NAME),
        vec![
            Some("Bronze".to_string()),
            Some("Gold".to_string()),
            Some("Silver".to_string())
        ]
    );
    assert_close(value_for(summary, PLAN_NAME, "Gold", TOTAL_PREMIUM), 800.0);
    assert_close(value_for(summary, PLAN_NAME, "Silver", TOTAL_PREMIUM), 200.0);
    assert_close(value_for(summary, PLAN_NAME, "Gold", TOTAL_COST), 150.0);
    assert_close(value_for(summary, PLAN_NAME, "Silver", TOTAL_COST), 30.0);
    // No in-window requests: cost stays null rather than zero.
    assert_eq!(value_for(summary, PLAN_NAME, "Bronze", TOTAL_COST), None);
}

#[test]
fn active_members_hold_a_current_retail_plan() {
    let retail = resolve_retail_mlr(&retail_book().build(), &EngineConfig::default()).unwrap();
    assert_eq!(
        strings(&retail.active_members, LEGACY_CODE),
        vec![Some("M-1".to_string()), Some("M-2".to_string())]
    );
}

fn two_current_plans_for_m1() -> Tables {
    retail_book().with(
        TableKind::MemberPlan,
        member_plans(&[
            (1, 1, "true"),
            (1, 2, "true"),
            (2, 2, "true"),
            (3, 3, "true"),
        ]),
    )
}

#[test]
fn member_with_several_current_plans_fans_out_per_plan() {
    let retail =
        resolve_retail_mlr(&two_current_plans_for_m1().build(), &EngineConfig::default()).unwrap();

    // M-1 reaches each plan through both enrollee joins: 2 x 2 copies of
    // its 150 in-window cost.
    let costs = &retail.member_costs;
    assert_eq!(
        strings(costs, PLAN_NAME),
        vec![
            Some("Gold".to_string()),
            Some("Silver".to_string()),
            Some("Silver".to_string())
        ]
    );
    assert_eq!(
        strings(costs, IID),
        vec![
            Some("M-1".to_string()),
            Some("M-1".to_string()),
            Some("M-2".to_string())
        ]
    );
    assert_eq!(
        floats_of(costs, TOTAL_COST),
        vec![Some(600.0), Some(600.0), Some(30.0)]
    );
    assert_close(value_for(&retail.plan_summary, PLAN_NAME, "Silver", TOTAL_COST), 630.0);
}

#[test]
fn active_members_are_ordered_by_member_then_plan() {
    let retail =
        resolve_retail_mlr(&two_current_plans_for_m1().build(), &EngineConfig::default()).unwrap();

    let members = &retail.active_members;
    assert_eq!(
        strings(members, LEGACY_CODE),
        vec![
            Some("M-1".to_string()),
            Some("M-1".to_string()),
            Some("M-2".to_string())
        ]
    );
    let plan_ids: Vec<Option<i64>> = members
        .column(PLAN_ID)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(plan_ids, vec![Some(1), Some(2), Some(2)]);
}

#[test]
fn product_line_match_is_case_insensitive_and_exact() {
    let book = retail_book()
        .with(
            TableKind::GroupDirectory,
            directory(&[(10, "Acme"), (20, "FAMILY scheme"), (30, "Family Plan")]),
        )
        .build();

    let retail = resolve_retail_mlr(&book, &EngineConfig::default()).unwrap();
    let plans = strings(&retail.plan_summary, PLAN_NAME);
    assert!(plans.contains(&Some("Gold".to_string())));
    assert!(!plans.contains(&Some("Basic".to_string())));
}

#[test]
fn configured_product_line_selects_other_plans() {
    let config = EngineConfig::default().with_retail_product_line("Family Plan");
    let retail = resolve_retail_mlr(&retail_book().build(), &config).unwrap();

    assert_eq!(
        strings(&retail.plan_summary, PLAN_NAME),
        vec![Some("Basic".to_string())]
    );
    assert_close(
        value_for(&retail.plan_summary, PLAN_NAME, "Basic", TOTAL_PREMIUM),
        1998.0,
    );
    assert_eq!(floats_of(&retail.member_costs, TOTAL_COST), vec![Some(999.0)]);
}

#[test]
fn empty_book_yields_empty_tables() {
    let retail = resolve_retail_mlr(&Tables::default().build(), &EngineConfig::default()).unwrap();
    assert_eq!(retail.member_costs.height(), 0);
    assert_eq!(retail.plan_summary.height(), 0);
    assert_eq!(retail.active_members.height(), 0);
}
