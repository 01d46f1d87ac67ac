//! Error types for the MLR engine.

use thiserror::Error;

use crate::schema::{ColumnKind, TableKind};

/// Errors raised while validating or computing MLR tables.
#[derive(Debug, Error)]
pub enum MlrError {
    /// A required source table was not supplied.
    #[error("missing source table: {table}")]
    MissingTable { table: TableKind },

    /// A required column is absent from a source table.
    #[error("table {table} is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: String },

    /// A required column has a dtype that cannot be normalized to its kind.
    #[error("table {table} column '{column}' expected {expected}, found {found}")]
    SchemaMismatch {
        table: TableKind,
        column: String,
        expected: ColumnKind,
        found: String,
    },

    /// A transform step failed inside one computation stage.
    #[error("{stage} failed: {message}")]
    Computation { stage: String, message: String },

    /// Underlying DataFrame operation failed.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl MlrError {
    pub fn computation(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Computation {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// True for errors detected before any computation ran.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTable { .. } | Self::MissingColumn { .. } | Self::SchemaMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MlrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MlrError::SchemaMismatch {
            table: TableKind::Claims,
            column: "approvedamount".to_string(),
            expected: ColumnKind::Decimal,
            found: "bool".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "table claims column 'approvedamount' expected decimal, found bool"
        );
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_computation_is_not_schema_error() {
        let err = MlrError::computation("pa_mlr", "join failed");
        assert_eq!(err.to_string(), "pa_mlr failed: join failed");
        assert!(!err.is_schema_error());
    }
}
