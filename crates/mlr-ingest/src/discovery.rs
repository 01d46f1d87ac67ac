//! Locating source table files in a snapshot directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mlr_model::TableKind;

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Match CSV files to table kinds by file stem.
///
/// Stems are compared case-insensitively against warehouse table names;
/// unrelated files are ignored. When two files map to the same table the
/// first in filename order wins.
pub fn match_table_files(files: &[PathBuf]) -> BTreeMap<TableKind, PathBuf> {
    let mut matched = BTreeMap::new();
    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(kind) = TableKind::from_warehouse_name(stem) else {
            tracing::debug!(path = %path.display(), "ignoring unrecognised csv file");
            continue;
        };
        matched.entry(kind).or_insert_with(|| path.clone());
    }
    matched
}

/// Locate a file for every table, failing on the first table without one.
pub fn locate_table_files(dir: &Path) -> Result<BTreeMap<TableKind, PathBuf>> {
    let files = list_csv_files(dir)?;
    let matched = match_table_files(&files);
    for table in TableKind::ALL {
        if !matched.contains_key(&table) {
            return Err(IngestError::TableNotFound {
                table,
                dir: dir.to_path_buf(),
            });
        }
    }
    Ok(matched)
}
