//! Shared utilities for MLR crates.
//!
//! This crate provides Polars `AnyValue` helpers used by both the engine
//! and the reporting layer.

pub mod polars;

pub use polars::{
    any_to_f64, any_to_string, column_strings, format_amount, format_numeric, format_ratio,
    parse_f64,
};
