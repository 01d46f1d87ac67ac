//! Inner join of dated transactions against validity intervals.
//!
//! A transaction survives once for every interval of its key that contains
//! its date, endpoints included. Transactions with no matching key, a null
//! date, or a date outside every interval are dropped. Overlapping
//! intervals therefore count a transaction more than once; callers report
//! that through the data-quality diagnostics instead of deduplicating.

use mlr_model::columns::{
    EFFECTIVE_DATE, END_DATE, GROUPNAME, IID, LEGACY_CODE, START_DATE, TERMINATION_DATE,
};
use polars::prelude::*;

use crate::frame_utils::left_ordered;

/// Column roles for one temporal join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow<'a> {
    /// Key column on the transaction side.
    pub transaction_key: &'a str,
    /// Key column on the interval side.
    pub interval_key: &'a str,
    pub start: &'a str,
    pub end: &'a str,
}

impl ValidityWindow<'static> {
    /// Group contract periods keyed by group name.
    pub const CONTRACT: Self = Self {
        transaction_key: GROUPNAME,
        interval_key: GROUPNAME,
        start: START_DATE,
        end: END_DATE,
    };

    /// Member enrollment windows keyed by the member's legacy code.
    pub const ENROLLMENT: Self = Self {
        transaction_key: IID,
        interval_key: LEGACY_CODE,
        start: EFFECTIVE_DATE,
        end: TERMINATION_DATE,
    };
}

/// `start <= date <= end`; null on any side evaluates to false.
pub fn within_window(date: &str, start: &str, end: &str) -> Expr {
    col(date)
        .gt_eq(col(start))
        .and(col(date).lt_eq(col(end)))
        .fill_null(lit(false))
}

/// Keep transactions whose `date_column` falls inside an interval of their key.
///
/// The interval bounds stay on the result; callers project what they need.
pub fn filter_within_intervals(
    transactions: LazyFrame,
    date_column: &str,
    intervals: LazyFrame,
    window: ValidityWindow<'_>,
) -> LazyFrame {
    let bounds = intervals.select([
        col(window.interval_key),
        col(window.start),
        col(window.end),
    ]);
    transactions
        .join(
            bounds,
            [col(window.transaction_key)],
            [col(window.interval_key)],
            left_ordered(JoinType::Inner),
        )
        .filter(within_window(date_column, window.start, window.end))
}
