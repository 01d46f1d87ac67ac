//! Time-boxed snapshot cache in front of a [`TableSource`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::Result;
use crate::source::{TableSource, load_snapshot};
use crate::tables::SourceTables;

/// Default time-to-live of a cached snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// A snapshot handed out by the cache.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: String,
    pub tables: Arc<SourceTables>,
    /// True when served without touching the source tables.
    pub from_cache: bool,
}

#[derive(Debug)]
struct CacheEntry {
    id: String,
    loaded_at: Instant,
    tables: Arc<SourceTables>,
}

/// Caches the nine source tables keyed by snapshot id.
///
/// An entry is reused while its snapshot id is unchanged and it is younger
/// than the TTL; otherwise the source is reloaded in full.
#[derive(Debug)]
pub struct SnapshotCache<S> {
    source: S,
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl<S: TableSource> SnapshotCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: None,
        }
    }

    pub fn with_default_ttl(source: S) -> Self {
        Self::new(source, DEFAULT_CACHE_TTL)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the current snapshot, reloading when stale.
    pub fn get(&mut self) -> Result<Snapshot> {
        let id = self.source.snapshot_id()?;
        if let Some(entry) = &self.entry {
            let fresh = entry.loaded_at.elapsed() < self.ttl;
            if fresh && entry.id == id {
                debug!(snapshot_id = %id, "snapshot cache hit");
                return Ok(Snapshot {
                    id,
                    tables: Arc::clone(&entry.tables),
                    from_cache: true,
                });
            }
            debug!(
                snapshot_id = %id,
                expired = !fresh,
                "snapshot cache entry stale"
            );
        }

        let tables = Arc::new(load_snapshot(&self.source)?);
        info!(snapshot_id = %id, "snapshot cached");
        self.entry = Some(CacheEntry {
            id: id.clone(),
            loaded_at: Instant::now(),
            tables: Arc::clone(&tables),
        });
        Ok(Snapshot {
            id,
            tables,
            from_cache: false,
        })
    }

    /// Drop the cached entry so the next `get` reloads.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
