//! Snapshot fingerprints.
//!
//! A fingerprint identifies one set of source files. It changes whenever a
//! file is replaced, resized or touched, which is what the cache keys on.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use mlr_model::TableKind;
use sha2::{Digest, Sha256};

use crate::error::{IngestError, Result};

/// Compute a hex SHA-256 fingerprint over each file's table, size and mtime.
pub fn fingerprint_files(files: &BTreeMap<TableKind, PathBuf>) -> Result<String> {
    let mut hasher = Sha256::new();
    for (table, path) in files {
        let metadata = std::fs::metadata(path).map_err(|e| IngestError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        let modified = metadata
            .modified()
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        hasher.update(table.warehouse_name().as_bytes());
        hasher.update([0u8]);
        hasher.update(metadata.len().to_le_bytes());
        hasher.update(modified.to_le_bytes());
    }
    Ok(hex::encode(hasher.finalize()))
}
