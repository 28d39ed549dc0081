//! Cache Store Module
//!
//! Single-threaded LRU engine combining a HashMap table with an arena recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::cache::{CacheEntry, LruList};

// == Cache Store ==
/// Bounded key/value table with strict LRU eviction.
///
/// Every key in `entries` has exactly one node in `order` and vice versa;
/// `entries.len() <= capacity` holds between calls.
#[derive(Debug, Clone)]
pub struct LruStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Recency order, head = MRU
    order: LruList<K>,
    /// Maximum number of entries allowed
    capacity: NonZeroUsize,
}

impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.get()),
            order: LruList::with_capacity(capacity.get()),
            capacity,
        }
    }

    // == Write ==
    /// Inserts or updates a key, making it the most recently used.
    ///
    /// When a new key pushes the size past capacity, the tail of the recency
    /// list is evicted and returned together with its entry.
    pub fn write(&mut self, key: K, value: V) -> Option<(K, CacheEntry<V>)> {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.replace(value);
            self.order.move_to_front(entry.node);
            return None;
        }

        let node = self.order.push_front(key.clone());
        self.entries.insert(key, CacheEntry::new(value, node));

        if self.entries.len() > self.capacity.get() {
            return self.evict_lru();
        }
        None
    }

    // == Try Read ==
    /// Returns the value for a key and promotes it to most recently used.
    ///
    /// Absent keys leave the store untouched.
    pub fn try_read<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.get(key)?;
        self.order.move_to_front(entry.node);
        Some(&entry.value)
    }

    // == Peek ==
    /// Returns the value for a key without touching recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns the next eviction candidate.
    #[cfg(test)]
    pub(crate) fn peek_lru(&self) -> Option<&K> {
        self.order.peek_back()
    }

    // == Keys ==
    /// Returns keys ordered from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    fn evict_lru(&mut self) -> Option<(K, CacheEntry<V>)> {
        let key = self.order.pop_back()?;
        let entry = self.entries.remove(&key)?;
        Some((key, entry))
    }

    // == Invariant Check ==
    /// Panics if the table and recency list disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        assert_eq!(self.entries.len(), self.order.len(), "table/order size mismatch");
        assert!(self.entries.len() <= self.capacity.get(), "size exceeds capacity");

        let mut seen = HashSet::new();
        for key in self.order.iter() {
            assert!(seen.insert(key), "duplicate key in order");
            let entry = self.entries.get(key).expect("ordered key missing from table");
            assert!(
                self.order.get(entry.node) == Some(key),
                "entry node handle points at another key"
            );
        }
    }
}
