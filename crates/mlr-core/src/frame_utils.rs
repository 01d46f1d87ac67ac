//! DataFrame helpers shared by the computation stages.

use polars::prelude::*;

/// Dtype every date column is normalized to before comparison.
pub fn timestamp_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, None)
}

pub fn as_text(name: &str) -> Expr {
    col(name).cast(DataType::String)
}

pub fn as_integer(name: &str) -> Expr {
    col(name).cast(DataType::Int64)
}

pub fn as_decimal(name: &str) -> Expr {
    col(name).cast(DataType::Float64)
}

/// Normalize a date column of `df` to [`timestamp_dtype`].
///
/// Text is parsed strictly with an inferred format, so a value that is not a
/// date fails the collect instead of turning into null.
pub fn as_timestamp(df: &DataFrame, name: &str) -> Expr {
    match df.column(name).map(Column::dtype) {
        Ok(DataType::String) => col(name).str().to_datetime(
            Some(TimeUnit::Microseconds),
            None,
            StrptimeOptions {
                strict: true,
                ..Default::default()
            },
            lit("raise"),
        ),
        _ => col(name).cast(timestamp_dtype()),
    }
}

/// Join arguments that keep the left frame's row order.
pub fn left_ordered(how: JoinType) -> JoinArgs {
    let mut args = JoinArgs::new(how);
    args.maintain_order = MaintainOrderJoin::Left;
    args
}

/// Case-insensitive equality of a string column against a lowered literal.
pub fn eq_ignore_case(name: &str, lowered: &str) -> Expr {
    col(name).str().to_lowercase().eq(lit(lowered.to_string()))
}

/// Round half away from zero to `decimals` places.
///
/// Non-finite values pass through unchanged.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Return `df` with each named Float64 column rounded.
pub fn round_columns(mut df: DataFrame, columns: &[&str], decimals: u32) -> PolarsResult<DataFrame> {
    for name in columns {
        let rounded = df
            .column(name)?
            .f64()?
            .apply_values(move |v| round_half_away(v, decimals));
        df.with_column(rounded.into_series())?;
    }
    Ok(df)
}

/// Ascending sort that keeps input order among ties and puts nulls last.
pub fn stable_order() -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_nulls_last(true)
        .with_maintain_order(true)
}

/// Descending variant of [`stable_order`].
pub fn stable_order_descending() -> SortMultipleOptions {
    stable_order().with_order_descending(true)
}

/// Count non-null, non-finite values in a Float64 column.
pub fn count_non_finite(df: &DataFrame, name: &str) -> usize {
    let Ok(column) = df.column(name) else {
        return 0;
    };
    let Ok(values) = column.f64() else {
        return 0;
    };
    values
        .into_iter()
        .filter(|value| value.is_some_and(|v| !v.is_finite()))
        .count()
}

/// Count nulls in a column; absent columns count as zero.
pub fn count_nulls(df: &DataFrame, name: &str) -> usize {
    df.column(name).map(|column| column.null_count()).unwrap_or(0)
}
