//! Tests for the table catalogue and engine configuration.

use mlr_model::columns::{GROUPNAME, MEMBER_ID, PLAN_ID};
use mlr_model::{ColumnKind, EngineConfig, TableKind};

#[test]
fn resolves_tables_by_warehouse_name() {
    assert_eq!(
        TableKind::from_warehouse_name("total_pa_procedures"),
        Some(TableKind::PreAuthorization)
    );
    assert_eq!(
        TableKind::from_warehouse_name(" ALL_GROUP "),
        Some(TableKind::GroupDirectory)
    );
    assert_eq!(TableKind::from_warehouse_name("unknown"), None);
}

#[test]
fn member_plan_declares_integer_keys() {
    let columns = TableKind::MemberPlan.required_columns();
    let member = columns.iter().find(|c| c.name == MEMBER_ID).expect("memberid");
    let plan = columns.iter().find(|c| c.name == PLAN_ID).expect("planid");
    assert_eq!(member.kind, ColumnKind::Integer);
    assert_eq!(plan.kind, ColumnKind::Integer);
}

#[test]
fn group_contract_is_keyed_by_groupname() {
    let columns = TableKind::GroupContract.required_columns();
    assert_eq!(columns[0].name, GROUPNAME);
    assert_eq!(columns.len(), 3);
}

#[test]
fn default_config_matches_dashboard_constants() {
    let config = EngineConfig::default();
    assert!((config.risk_threshold - 75.0).abs() < f64::EPSILON);
    assert!((config.commission_rate - 0.10).abs() < f64::EPSILON);
    assert!((config.pa_loading_factor - 1.4).abs() < f64::EPSILON);
    assert_eq!(config.product_line_key(), "family scheme");
    assert_eq!(config.ratio_decimals, 2);
}

#[test]
fn partial_json_config_keeps_defaults() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"risk_threshold": 80.0, "retail_product_line": "Family Scheme"}"#)
            .expect("parse config");
    assert!((config.risk_threshold - 80.0).abs() < f64::EPSILON);
    assert_eq!(config.product_line_key(), "family scheme");
    assert_eq!(config.pass_through_marker, "tpa");
}

#[test]
fn builders_override_fields() {
    let config = EngineConfig::default()
        .with_risk_threshold(60.0)
        .with_pass_through_marker("TPA");
    assert!((config.risk_threshold - 60.0).abs() < f64::EPSILON);
    assert_eq!(config.pass_through_key(), "tpa");
}
