//! Concurrent Cache Module
//!
//! Thread-safe LRU cache guarded by a single reader/upgradable/writer lock.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::debug;

use crate::cache::{CacheStats, LruStore, StatsCounters};
use crate::error::CacheError;

// == Concurrent LRU Cache ==
/// Bounded LRU cache shared between request tasks.
///
/// One `RwLock` guards the table and the recency list together:
/// - `contains`, `len` and `keys` take the shared tier
/// - `try_read` checks under the upgradable tier and upgrades only on a hit
/// - `write` takes the exclusive tier
///
/// Guards are never held across an `.await`, so the blocking lock is safe to
/// use from async handlers.
#[derive(Debug)]
pub struct ConcurrentLruCache<K, V> {
    inner: RwLock<LruStore<K, V>>,
    stats: StatsCounters,
}

impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            CacheError::InvalidConfiguration("Capacity must be greater than 0".to_string())
        })?;

        Ok(Self {
            inner: RwLock::new(LruStore::new(capacity)),
            stats: StatsCounters::new(),
        })
    }

    // == Write ==
    /// Inserts or updates a value and marks the key most recently used.
    ///
    /// Evicts the least recently used entry when a new key overflows capacity.
    pub fn write(&self, key: K, value: V) {
        let mut store = self.inner.write();
        let is_new = !store.contains(&key);
        let evicted = store.write(key, value);
        drop(store);

        if is_new {
            self.stats.record_insertion();
        }
        if let Some((evicted_key, entry)) = evicted {
            self.stats.record_eviction();
            debug!(key = ?evicted_key, age_ms = entry.age().as_millis() as u64, "Evicted LRU entry");
        }
    }

    // == Try Read ==
    /// Returns a clone of the cached value and promotes the key.
    ///
    /// A miss returns `None` without taking the exclusive tier.
    pub fn try_read<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let guard = self.inner.upgradable_read();
        if !guard.contains(key) {
            drop(guard);
            self.stats.record_miss();
            return None;
        }

        let mut store = RwLockUpgradableReadGuard::upgrade(guard);
        let value = store.try_read(key).cloned();
        drop(store);

        // Still present: the upgrade is atomic, no writer can slip in.
        self.stats.record_hit();
        value
    }

    // == Contains ==
    /// Checks for a key under the shared tier, without promoting it.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains(key)
    }

    /// Returns keys ordered from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let (len, capacity) = {
            let store = self.inner.read();
            (store.len(), store.capacity())
        };
        self.stats.snapshot(len, capacity)
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.inner.read().assert_invariants();
    }

    #[cfg(test)]
    pub(crate) fn inner_peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().peek(key).cloned()
    }
}
