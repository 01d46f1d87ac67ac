#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mlr_ingest::SourceTables;
use mlr_model::TableKind;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn text(name: &str, values: Vec<&str>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn opt_text(name: &str, values: Vec<Option<&str>>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn dates(name: &str, values: Vec<NaiveDate>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn floats(name: &str, values: Vec<f64>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn ints(name: &str, values: Vec<i64>) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn contracts(rows: &[(&str, NaiveDate, NaiveDate)]) -> DataFrame {
    DataFrame::new(vec![
        text("groupname", rows.iter().map(|r| r.0).collect()),
        dates("startdate", rows.iter().map(|r| r.1).collect()),
        dates("enddate", rows.iter().map(|r| r.2).collect()),
    ])
    .unwrap()
}

/// `(groupname, requestdate, granted, iid)`
pub fn pre_authorizations(rows: &[(&str, NaiveDate, f64, &str)]) -> DataFrame {
    DataFrame::new(vec![
        text("groupname", rows.iter().map(|r| r.0).collect()),
        dates("requestdate", rows.iter().map(|r| r.1).collect()),
        floats("granted", rows.iter().map(|r| r.2).collect()),
        text("iid", rows.iter().map(|r| r.3).collect()),
    ])
    .unwrap()
}

/// `(nhisgroupid, approvedamount, encounterdatefrom)`
pub fn claims(rows: &[(&str, f64, NaiveDate)]) -> DataFrame {
    DataFrame::new(vec![
        text("nhisgroupid", rows.iter().map(|r| r.0).collect()),
        floats("approvedamount", rows.iter().map(|r| r.1).collect()),
        dates("encounterdatefrom", rows.iter().map(|r| r.2).collect()),
    ])
    .unwrap()
}

/// `(groupid, groupname)`
pub fn directory(rows: &[(i64, &str)]) -> DataFrame {
    DataFrame::new(vec![
        ints("groupid", rows.iter().map(|r| r.0).collect()),
        text("groupname", rows.iter().map(|r| r.1).collect()),
    ])
    .unwrap()
}

/// `(company_name, from, amount, description)`
pub fn debit_notes(rows: &[(&str, NaiveDate, f64, Option<&str>)]) -> DataFrame {
    DataFrame::new(vec![
        text("company_name", rows.iter().map(|r| r.0).collect()),
        dates("from", rows.iter().map(|r| r.1).collect()),
        floats("amount", rows.iter().map(|r| r.2).collect()),
        opt_text("description", rows.iter().map(|r| r.3).collect()),
    ])
    .unwrap()
}

/// `(legacycode, memberid, effectivedate, terminationdate)`
pub fn enrollees(rows: &[(&str, i64, NaiveDate, NaiveDate)]) -> DataFrame {
    DataFrame::new(vec![
        text("legacycode", rows.iter().map(|r| r.0).collect()),
        ints("memberid", rows.iter().map(|r| r.1).collect()),
        dates("effectivedate", rows.iter().map(|r| r.2).collect()),
        dates("terminationdate", rows.iter().map(|r| r.3).collect()),
    ])
    .unwrap()
}

/// `(memberid, planid, iscurrent)`
pub fn member_plans(rows: &[(i64, i64, &str)]) -> DataFrame {
    DataFrame::new(vec![
        ints("memberid", rows.iter().map(|r| r.0).collect()),
        ints("planid", rows.iter().map(|r| r.1).collect()),
        text("iscurrent", rows.iter().map(|r| r.2).collect()),
    ])
    .unwrap()
}

/// `(planid, groupid, individualprice, familyprice, countofindividual, countoffamily)`
pub fn group_plans(rows: &[(i64, i64, f64, f64, i64, i64)]) -> DataFrame {
    DataFrame::new(vec![
        ints("planid", rows.iter().map(|r| r.0).collect()),
        ints("groupid", rows.iter().map(|r| r.1).collect()),
        floats("individualprice", rows.iter().map(|r| r.2).collect()),
        floats("familyprice", rows.iter().map(|r| r.3).collect()),
        ints("countofindividual", rows.iter().map(|r| r.4).collect()),
        ints("countoffamily", rows.iter().map(|r| r.5).collect()),
        ints("maxnumdependant", rows.iter().map(|_| 4).collect()),
    ])
    .unwrap()
}

/// `(planid, planname)`
pub fn plans(rows: &[(i64, &str)]) -> DataFrame {
    DataFrame::new(vec![
        ints("planid", rows.iter().map(|r| r.0).collect()),
        text("planname", rows.iter().map(|r| r.1).collect()),
    ])
    .unwrap()
}

/// A snapshot builder starting from nine empty, correctly typed tables.
pub struct Tables {
    frames: BTreeMap<TableKind, DataFrame>,
}

impl Default for Tables {
    fn default() -> Self {
        let frames = BTreeMap::from([
            (TableKind::GroupContract, contracts(&[])),
            (TableKind::PreAuthorization, pre_authorizations(&[])),
            (TableKind::Claims, claims(&[])),
            (TableKind::GroupDirectory, directory(&[])),
            (TableKind::DebitNote, debit_notes(&[])),
            (TableKind::ActiveEnrollee, enrollees(&[])),
            (TableKind::MemberPlan, member_plans(&[])),
            (TableKind::GroupPlan, group_plans(&[])),
            (TableKind::Plan, plans(&[])),
        ]);
        Self { frames }
    }
}

impl Tables {
    pub fn with(mut self, kind: TableKind, df: DataFrame) -> Self {
        self.frames.insert(kind, df);
        self
    }

    pub fn build(self) -> SourceTables {
        SourceTables::from_map(self.frames).unwrap()
    }
}

/// Acme with a 2023 contract, 1000 of premium, a tpa fee and one PA request.
pub fn acme(pa_granted: f64) -> Tables {
    Tables::default()
        .with(
            TableKind::GroupContract,
            contracts(&[("Acme", date(2023, 1, 1), date(2023, 12, 31))]),
        )
        .with(
            TableKind::DebitNote,
            debit_notes(&[
                ("Acme", date(2023, 6, 1), 1000.0, Some("premium")),
                ("Acme", date(2023, 6, 15), 500.0, Some("tpa fee")),
            ]),
        )
        .with(
            TableKind::PreAuthorization,
            pre_authorizations(&[("Acme", date(2023, 6, 10), pa_granted, "A-1")]),
        )
}

pub fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

pub fn floats_of(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column).unwrap().f64().unwrap().into_iter().collect()
}

/// Value of `column` on the row whose `key_column` equals `key`.
pub fn value_for(df: &DataFrame, key_column: &str, key: &str, column: &str) -> Option<f64> {
    let keys = strings(df, key_column);
    let row = keys
        .iter()
        .position(|k| k.as_deref() == Some(key))
        .unwrap_or_else(|| panic!("no row with {key_column} = {key}"));
    floats_of(df, column)[row]
}

pub fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value is null");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
