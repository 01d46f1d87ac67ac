//! Table sources and all-or-nothing snapshot loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mlr_model::TableKind;
use polars::prelude::DataFrame;
use tracing::{debug, error, info};

use crate::csv::read_csv_table;
use crate::discovery::locate_table_files;
use crate::error::{IngestError, Result};
use crate::snapshot::fingerprint_files;
use crate::tables::SourceTables;

/// Supplier of the nine source tables.
pub trait TableSource {
    /// Human-readable location of the source, for logs.
    fn describe(&self) -> String;

    /// Identifier of the data currently behind this source.
    fn snapshot_id(&self) -> Result<String>;

    /// Fetch a single table.
    fn load_table(&self, table: TableKind) -> Result<DataFrame>;
}

/// A directory holding one CSV export per warehouse table.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableSource for CsvDirectorySource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn snapshot_id(&self) -> Result<String> {
        let files = locate_table_files(&self.dir)?;
        fingerprint_files(&files)
    }

    fn load_table(&self, table: TableKind) -> Result<DataFrame> {
        let files = locate_table_files(&self.dir)?;
        let path = files
            .get(&table)
            .ok_or_else(|| IngestError::TableNotFound {
                table,
                dir: self.dir.clone(),
            })?;
        read_csv_table(path)
    }
}

/// Load every table from a source, aborting on the first failure.
///
/// No partial snapshot is ever returned.
pub fn load_snapshot(source: &dyn TableSource) -> Result<SourceTables> {
    let started = Instant::now();
    let mut tables = BTreeMap::new();
    for table in TableKind::ALL {
        match source.load_table(table) {
            Ok(df) => {
                debug!(table = %table, rows = df.height(), "loaded table");
                tables.insert(table, df);
            }
            Err(err) => {
                error!(
                    source = %source.describe(),
                    table = %table,
                    error = %err,
                    "table load failed; aborting snapshot"
                );
                return Err(err);
            }
        }
    }
    let snapshot = SourceTables::from_map(tables)?;
    info!(
        source = %source.describe(),
        table_count = TableKind::ALL.len(),
        duration_ms = started.elapsed().as_millis(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
