//! Sharded map for accumulating values from several threads without a global lock.
//!
//! Keys are integers; each key lives in shard `key as u64 % shard_count`. At most one
//! shard lock is held at any time, including while merging.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Integer keys that can be assigned to a shard.
pub trait ShardKey: Copy + Ord {
    fn shard_hash(self) -> u64;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(impl ShardKey for $t {
            #[inline]
            fn shard_hash(self) -> u64 {
                // wrapping cast keeps negative keys in range
                self as u64
            }
        })*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Exclusive access to one value; its shard stays locked until this is dropped.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: K) -> &Mutex<BTreeMap<K, V>> {
        let idx = key.shard_hash() % self.shards.len() as u64;
        &self.shards[idx as usize]
    }

    /// Lock the key's shard and return its value, inserting `V::default()` if absent.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.shard(key).lock(), |map| map.entry(key).or_default())
    }

    pub fn erase(&self, key: K) -> Option<V> {
        self.shard(key).lock().remove(&key)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy every shard into one map, locking shards one after another.
    pub fn merge_to_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            result.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }

    /// Like [`merge_to_ordinary_map`](Self::merge_to_ordinary_map) but moves values out.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards {
            result.extend(shard.into_inner());
        }
        result
    }
}
