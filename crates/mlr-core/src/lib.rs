//! MLR computation engine.
//!
//! Given a complete [`SourceTables`](mlr_ingest::SourceTables) snapshot the
//! engine produces:
//!
//! - PA-based and claims-based MLR per client group ([`combine`])
//! - retail member cost, plan premium summary and active members ([`retail`])
//! - the groups above the risk threshold ([`flag`])
//! - data-quality diagnostics ([`quality`])
//!
//! [`MlrEngine::run`] validates the snapshot and runs every pipeline with
//! per-pipeline failure containment.

pub mod aggregate;
pub mod combine;
pub mod engine;
pub mod flag;
pub mod frame_utils;
pub mod normalize;
pub mod quality;
pub mod retail;
pub mod schema;
pub mod stage;
pub mod temporal;

pub use aggregate::{aggregate_claims, aggregate_debit_notes, aggregate_pre_authorizations};
pub use combine::{combine_claims_mlr, combine_pa_mlr};
pub use engine::{MlrEngine, MlrReport, Stage, StageFailure};
pub use flag::{FlaggedGroups, flag_groups, flag_high_mlr};
pub use quality::{DataQualityReport, MetricQuality};
pub use retail::{RetailMlr, resolve_retail_mlr};
pub use schema::{validate_sources, validate_table};
pub use temporal::{ValidityWindow, filter_within_intervals};
