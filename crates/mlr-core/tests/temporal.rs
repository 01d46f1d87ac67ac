mod common;

use common::{contracts, date, pre_authorizations, strings};
use mlr_core::temporal::{ValidityWindow, filter_within_intervals};
use mlr_model::columns::{GRANTED, IID, REQUEST_DATE};
use polars::prelude::{DataFrame, IntoLazy, SortMultipleOptions};

fn filtered(requests: &DataFrame, periods: &DataFrame) -> DataFrame {
    filter_within_intervals(
        requests.clone().lazy(),
        REQUEST_DATE,
        periods.clone().lazy(),
        ValidityWindow::CONTRACT,
    )
    .collect()
    .unwrap()
}

#[test]
fn endpoints_are_inclusive() {
    let periods = contracts(&[("Acme", date(2023, 1, 1), date(2023, 12, 31))]);
    let requests = pre_authorizations(&[
        ("Acme", date(2022, 12, 31), 1.0, "before"),
        ("Acme", date(2023, 1, 1), 2.0, "start"),
        ("Acme", date(2023, 7, 1), 3.0, "middle"),
        ("Acme", date(2023, 12, 31), 4.0, "end"),
        ("Acme", date(2024, 1, 1), 5.0, "after"),
    ]);

    let kept = filtered(&requests, &periods);
    assert_eq!(
        strings(&kept, IID),
        vec![
            Some("start".to_string()),
            Some("middle".to_string()),
            Some("end".to_string())
        ]
    );
}

#[test]
fn groups_without_contract_are_dropped() {
    let periods = contracts(&[("Acme", date(2023, 1, 1), date(2023, 12, 31))]);
    let requests = pre_authorizations(&[
        ("Acme", date(2023, 3, 1), 10.0, "a"),
        ("Globex", date(2023, 3, 1), 20.0, "g"),
    ]);

    let kept = filtered(&requests, &periods);
    assert_eq!(kept.height(), 1);
    assert_eq!(strings(&kept, IID), vec![Some("a".to_string())]);
}

#[test]
fn overlapping_periods_fan_out() {
    let periods = contracts(&[
        ("Acme", date(2023, 1, 1), date(2023, 12, 31)),
        ("Acme", date(2023, 6, 1), date(2024, 5, 31)),
    ]);
    let requests = pre_authorizations(&[
        ("Acme", date(2023, 3, 1), 10.0, "single"),
        ("Acme", date(2023, 7, 1), 20.0, "double"),
    ]);

    let kept = filtered(&requests, &periods)
        .sort([IID], SortMultipleOptions::default())
        .unwrap();
    assert_eq!(
        strings(&kept, IID),
        vec![
            Some("double".to_string()),
            Some("double".to_string()),
            Some("single".to_string())
        ]
    );
    let total: f64 = kept
        .column(GRANTED)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .sum();
    assert!((total - 50.0).abs() < 1e-9);
}

#[test]
fn enrollment_window_joins_on_legacy_code() {
    let windows = common::enrollees(&[("M-1", 1, date(2023, 2, 1), date(2023, 2, 28))]);
    let requests = pre_authorizations(&[
        ("Family Scheme", date(2023, 2, 28), 5.0, "M-1"),
        ("Family Scheme", date(2023, 3, 1), 6.0, "M-1"),
        ("Family Scheme", date(2023, 2, 10), 7.0, "M-2"),
    ]);

    let kept = filter_within_intervals(
        requests.lazy(),
        REQUEST_DATE,
        windows.lazy(),
        ValidityWindow::ENROLLMENT,
    )
    .collect()
    .unwrap();
    assert_eq!(kept.height(), 1);
    let granted: Vec<Option<f64>> = kept.column(GRANTED).unwrap().f64().unwrap().into_iter().collect();
    assert_eq!(granted, vec![Some(5.0)]);
}
