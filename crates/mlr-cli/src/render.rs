//! Converting result tables to display strings.

use mlr_common::{any_to_string, format_amount, format_numeric, format_ratio};
use mlr_core::FlaggedGroups;
use mlr_model::columns::{MLR_CLAIMS, MLR_PA};
use polars::prelude::{AnyValue, Column, DataFrame};

/// Whether a column holds MLR percentages.
pub fn is_ratio_column(name: &str) -> bool {
    name == MLR_PA || name == MLR_CLAIMS
}

/// Display string of one cell.
///
/// Ratios get a percent sign, other floats two decimals; non-finite values
/// stay visible as `inf` or `NaN`.
pub fn format_cell(column: &Column, row: usize) -> String {
    let Ok(value) = column.get(row) else {
        return String::new();
    };
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float64(v) if is_ratio_column(column.name()) => format_ratio(Some(v)),
        AnyValue::Float64(v) => format_amount(Some(v)),
        other => any_to_string(other),
    }
}

/// All cells of `df`, row-major.
pub fn frame_rows(df: &DataFrame) -> Vec<Vec<String>> {
    (0..df.height())
        .map(|row| {
            df.get_columns()
                .iter()
                .map(|column| format_cell(column, row))
                .collect()
        })
        .collect()
}

/// Per-row flag: `mlr_column` strictly above `threshold`.
///
/// Rows with a null or NaN ratio are not highlighted.
pub fn rows_above(df: &DataFrame, mlr_column: &str, threshold: f64) -> Vec<bool> {
    let Some(values) = df.column(mlr_column).ok().and_then(|column| column.f64().ok()) else {
        return vec![false; df.height()];
    };
    values
        .into_iter()
        .map(|value| value.is_some_and(|v| v > threshold))
        .collect()
}

/// Headers of the flagged-group table.
pub fn flagged_headers(threshold: f64) -> [String; 2] {
    let threshold = format_numeric(threshold);
    [
        format!("PA MLR > {threshold}%"),
        format!("Claims MLR > {threshold}%"),
    ]
}

/// The two flagged lists side by side, the shorter padded with empty strings.
pub fn flagged_rows(flagged: &FlaggedGroups) -> Vec<[String; 2]> {
    let height = flagged.pa.len().max(flagged.claims.len());
    (0..height)
        .map(|i| {
            [
                flagged.pa.get(i).cloned().unwrap_or_default(),
                flagged.claims.get(i).cloned().unwrap_or_default(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    use super::*;

    #[test]
    fn ratio_cells_keep_non_finite_values() {
        let column = Series::new(
            MLR_PA.into(),
            &[Some(66.0_f64), Some(f64::INFINITY), None],
        )
        .into_column();
        assert_eq!(format_cell(&column, 0), "66.00%");
        assert_eq!(format_cell(&column, 1), "inf");
        assert_eq!(format_cell(&column, 2), "");
    }

    #[test]
    fn amount_cells_use_two_decimals() {
        let column = Series::new("debit_total".into(), &[1000.0_f64]).into_column();
        assert_eq!(format_cell(&column, 0), "1000.00");
    }

    #[test]
    fn pads_shorter_flag_list() {
        let flagged = FlaggedGroups {
            pa: vec!["Acme".to_string(), "Globex".to_string()],
            claims: vec!["Initech".to_string()],
        };
        assert_eq!(
            flagged_rows(&flagged),
            vec![
                ["Acme".to_string(), "Initech".to_string()],
                ["Globex".to_string(), String::new()],
            ]
        );
        assert_eq!(flagged_headers(75.0)[0], "PA MLR > 75%");
    }
}
