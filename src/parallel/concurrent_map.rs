use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

use crate::core::types::DocId;

/// Keys a `ConcurrentMap` can stripe on: non-negative integers (and the
/// id newtype over them). The Rust stand-in for the original's
/// integral-keys-only constraint.
pub trait ShardKey: Copy + Ord {
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(impl ShardKey for $t {
            fn shard_index(&self, shard_count: usize) -> usize {
                (*self as u64 % shard_count as u64) as usize
            }
        })*
    };
}

impl_shard_key!(u32, u64, usize);

impl ShardKey for DocId {
    fn shard_index(&self, shard_count: usize) -> usize {
        (self.0 as u64 % shard_count as u64) as usize
    }
}

/// Lock-striped key → value map. A fixed number of shards, each behind its
/// own mutex; `shard = key mod N`, so one key's updates always serialize on
/// the single shard that owns it while different shards never contend.
///
/// Built for parallel relevance accumulation: many worker tasks call
/// `access_or_insert` concurrently, then a join, then one thread drains.
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default> ConcurrentMap<K, V> {
    /// `shard_count` is fixed for the lifetime of the map
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "ConcurrentMap needs at least one shard");
        ConcurrentMap {
            shards: (0..shard_count)
                .map(|_| Mutex::new(BTreeMap::new()))
                .collect(),
        }
    }

    /// Exclusive access to the value under `key`, default-inserting it if
    /// absent. Only the owning shard is locked; the lock drops with the
    /// returned guard on every exit path.
    pub fn access_or_insert(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        MutexGuard::map(shard.lock(), |entries| entries.entry(key).or_default())
    }

    /// Remove `key` from its shard; no-op when absent
    pub fn erase(&self, key: K) {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        shard.lock().remove(&key);
    }

    /// Drain every shard into one key-ordered map, one shard at a time.
    /// Not a point-in-time snapshot across shards: callers must have
    /// joined all writers first (the parallel ranking path does).
    pub fn drain_to_ordered(&self) -> BTreeMap<K, V> {
        let mut ordered = BTreeMap::new();
        for shard in &self.shards {
            let mut entries = shard.lock();
            ordered.append(&mut *entries);
        }
        ordered
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
