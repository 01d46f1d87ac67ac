//! Validation of loaded tables against the declared source columns.

use mlr_ingest::SourceTables;
use mlr_model::{ColumnKind, MlrError, Result, TableKind};
use polars::prelude::{DataFrame, DataType};
use tracing::warn;

/// Whether a column of `dtype` can be normalized to `kind`.
///
/// String columns are accepted for every kind. Text timestamps are parsed
/// strictly during normalization, so a malformed date fails its stage.
pub fn kind_accepts(kind: ColumnKind, dtype: &DataType) -> bool {
    let textual = matches!(dtype, DataType::String | DataType::Null);
    match kind {
        ColumnKind::Text => textual || dtype.is_integer(),
        ColumnKind::Integer => textual || dtype.is_integer() || dtype.is_float(),
        ColumnKind::Decimal => textual || dtype.is_integer() || dtype.is_float(),
        ColumnKind::Timestamp => {
            textual || matches!(dtype, DataType::Date | DataType::Datetime(_, _))
        }
        ColumnKind::Flag => textual || matches!(dtype, DataType::Boolean),
    }
}

/// Check that `df` carries every column `table` requires with a compatible dtype.
pub fn validate_table(table: TableKind, df: &DataFrame) -> Result<()> {
    for spec in table.required_columns() {
        let column = df
            .column(spec.name)
            .map_err(|_| MlrError::MissingColumn {
                table,
                column: spec.name.to_string(),
            })?;
        let dtype = column.dtype();
        if !kind_accepts(spec.kind, dtype) {
            return Err(MlrError::SchemaMismatch {
                table,
                column: spec.name.to_string(),
                expected: spec.kind,
                found: dtype.to_string(),
            });
        }
        if spec.kind == ColumnKind::Timestamp && matches!(dtype, DataType::String) {
            warn!(
                table = %table,
                column = spec.name,
                "timestamp column loaded as text; parsing with an inferred format"
            );
        }
    }
    Ok(())
}

/// Validate all nine tables, stopping at the first violation.
pub fn validate_sources(tables: &SourceTables) -> Result<()> {
    for kind in TableKind::ALL {
        validate_table(kind, tables.table(kind))?;
    }
    Ok(())
}
