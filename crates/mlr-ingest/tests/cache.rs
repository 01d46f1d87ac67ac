//! Tests for the snapshot cache.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use mlr_ingest::{IngestError, Result, SnapshotCache, TableSource};
use mlr_model::TableKind;
use polars::prelude::DataFrame;

/// Source that serves empty tables and counts how often it is read.
struct CountingSource {
    snapshot: RefCell<String>,
    loads: Cell<usize>,
    fail_on: Option<TableKind>,
}

impl CountingSource {
    fn new(snapshot: &str) -> Self {
        Self {
            snapshot: RefCell::new(snapshot.to_string()),
            loads: Cell::new(0),
            fail_on: None,
        }
    }

    fn full_loads(&self) -> usize {
        self.loads.get() / TableKind::ALL.len()
    }
}

impl TableSource for CountingSource {
    fn describe(&self) -> String {
        "counting".to_string()
    }

    fn snapshot_id(&self) -> Result<String> {
        Ok(self.snapshot.borrow().clone())
    }

    fn load_table(&self, table: TableKind) -> Result<DataFrame> {
        if self.fail_on == Some(table) {
            return Err(IngestError::MissingTable { table });
        }
        self.loads.set(self.loads.get() + 1);
        Ok(DataFrame::default())
    }
}

#[test]
fn serves_cached_snapshot_within_ttl() {
    let mut cache = SnapshotCache::new(CountingSource::new("v1"), Duration::from_secs(3600));

    let first = cache.get().expect("first load");
    let second = cache.get().expect("second load");

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(first.id, second.id);
    assert_eq!(cache.source().full_loads(), 1);
}

#[test]
fn reloads_after_ttl_expires() {
    let mut cache = SnapshotCache::new(CountingSource::new("v1"), Duration::ZERO);

    cache.get().expect("first load");
    let second = cache.get().expect("second load");

    assert!(!second.from_cache);
    assert_eq!(cache.source().full_loads(), 2);
}

#[test]
fn reloads_when_snapshot_changes() {
    let mut cache = SnapshotCache::new(CountingSource::new("v1"), Duration::from_secs(3600));

    cache.get().expect("first load");
    cache.source().snapshot.replace("v2".to_string());
    let second = cache.get().expect("second load");

    assert!(!second.from_cache);
    assert_eq!(second.id, "v2");
    assert_eq!(cache.source().full_loads(), 2);
}

#[test]
fn invalidate_forces_reload() {
    let mut cache = SnapshotCache::with_default_ttl(CountingSource::new("v1"));

    cache.get().expect("first load");
    cache.invalidate();
    let second = cache.get().expect("second load");

    assert!(!second.from_cache);
    assert_eq!(cache.source().full_loads(), 2);
}

#[test]
fn failed_load_is_not_cached() {
    let mut source = CountingSource::new("v1");
    source.fail_on = Some(TableKind::Plan);
    let mut cache = SnapshotCache::new(source, Duration::from_secs(3600));

    assert!(cache.get().is_err());
    assert!(cache.get().is_err());
}
