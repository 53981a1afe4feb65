//! Short-lived snapshot cache of the full table.
//!
//! One slot, one generation: the whole `read_all` result is memoized
//! for the configured lifetime and discarded wholesale on any
//! mutation. Record positions are only meaningful within a single
//! generation; after an invalidation every previously observed
//! position is stale.

use kaizen_core::IdeaRecord;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Snapshot {
    records: Arc<Vec<IdeaRecord>>,
    fetched_at: Instant,
}

/// TTL cache holding the last successful full-table read.
///
/// Shared process-wide; concurrent readers and writers are tolerated.
/// The correctness bar is eventual consistency within the lifetime,
/// not strict consistency.
pub struct TableCache {
    ttl: Duration,
    slot: RwLock<Option<Snapshot>>,
}

impl TableCache {
    /// Create a cache with the given snapshot lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// The configured snapshot lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached snapshot, if one exists and is younger than the
    /// lifetime.
    pub async fn get(&self) -> Option<Arc<Vec<IdeaRecord>>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|snapshot| snapshot.fetched_at.elapsed() < self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.records))
    }

    /// Replace the snapshot, starting a new generation.
    pub async fn store(&self, records: Vec<IdeaRecord>) -> Arc<Vec<IdeaRecord>> {
        let records = Arc::new(records);
        let mut slot = self.slot.write().await;
        *slot = Some(Snapshot {
            records: Arc::clone(&records),
            fetched_at: Instant::now(),
        });
        records
    }

    /// Unconditionally discard the snapshot; the next `get` misses.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> IdeaRecord {
        let mut r = IdeaRecord::new();
        r.set_id(id);
        r
    }

    #[tokio::test]
    async fn test_get_returns_stored_snapshot() {
        let cache = TableCache::new(Duration::from_secs(300));
        assert!(cache.get().await.is_none());

        let stored = cache.store(vec![record(1), record(2)]).await;
        let read = cache.get().await.expect("fresh snapshot");
        assert!(Arc::ptr_eq(&stored, &read));
        assert_eq!(read.len(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_discards_snapshot() {
        let cache = TableCache::new(Duration::from_secs(300));
        cache.store(vec![record(1)]).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_expires_after_ttl() {
        let cache = TableCache::new(Duration::from_millis(10));
        cache.store(vec![record(1)]).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(cache.get().await.is_none());
    }
}
