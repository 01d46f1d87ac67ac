//! Source snapshot loading for MLR analysis.
//!
//! This crate plays the warehouse-loader role: it supplies the nine source
//! tables as Polars DataFrames, all or nothing.
//!
//! # Features
//!
//! - **CSV Loading**: one CSV export per warehouse table, dates inferred
//! - **Table Discovery**: match files to tables by warehouse name
//! - **Fingerprints**: SHA-256 snapshot ids over file metadata
//! - **Caching**: TTL cache keyed by snapshot id
//!
//! # Example
//!
//! ```ignore
//! use mlr_ingest::{CsvDirectorySource, SnapshotCache};
//!
//! let mut cache = SnapshotCache::with_default_ttl(CsvDirectorySource::new("exports/2024-06"));
//! let snapshot = cache.get()?;
//! println!("{} claims", snapshot.tables.claims.height());
//! ```

mod cache;
mod csv;
mod discovery;
mod error;
mod snapshot;
mod source;
mod tables;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use csv::{INFER_SCHEMA_ROWS, read_csv_table};
pub use discovery::{list_csv_files, locate_table_files, match_table_files};
pub use snapshot::fingerprint_files;
pub use source::{CsvDirectorySource, TableSource, load_snapshot};
pub use tables::SourceTables;

// === Caching ===
pub use cache::{DEFAULT_CACHE_TTL, Snapshot, SnapshotCache};
