//! Data model for Medical Loss Ratio analysis.
//!
//! Describes the source tables the warehouse loader supplies, the column
//! names the engine produces, engine tunables and the error taxonomy.

pub mod columns;
pub mod config;
pub mod error;
pub mod schema;

pub use config::EngineConfig;
pub use error::{MlrError, Result};
pub use schema::{ColumnKind, ColumnSpec, TableKind};
