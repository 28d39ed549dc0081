//! Cache Entry Module
//!
//! Defines the structure stored in the cache table for each key.

use std::time::Instant;

use crate::cache::NodeId;

// == Cache Entry ==
/// A cached value plus its position in the recency list.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Handle of this key's node in the recency list
    pub node: NodeId,
    /// When the value was last written
    pub written_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry linked to the given recency node.
    pub fn new(value: V, node: NodeId) -> Self {
        Self {
            value,
            node,
            written_at: Instant::now(),
        }
    }

    // == Replace ==
    /// Overwrites the value, keeping the recency node.
    ///
    /// Returns the previous value.
    pub fn replace(&mut self, value: V) -> V {
        self.written_at = Instant::now();
        std::mem::replace(&mut self.value, value)
    }

    /// Time elapsed since the value was last written.
    pub fn age(&self) -> std::time::Duration {
        self.written_at.elapsed()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LruList;

    #[test]
    fn test_entry_creation() {
        let mut list = LruList::new();
        let node = list.push_front("a");
        let entry = CacheEntry::new(1, node);

        assert_eq!(entry.value, 1);
        assert_eq!(entry.node, node);
    }

    #[test]
    fn test_entry_replace_keeps_node() {
        let mut list = LruList::new();
        let node = list.push_front("a");
        let mut entry = CacheEntry::new("old", node);
        let first_write = entry.written_at;

        let previous = entry.replace("new");

        assert_eq!(previous, "old");
        assert_eq!(entry.value, "new");
        assert_eq!(entry.node, node);
        assert!(entry.written_at >= first_write);
    }

    #[test]
    fn test_entry_age_grows() {
        let mut list = LruList::new();
        let entry = CacheEntry::new((), list.push_front("a"));

        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(entry.age() >= std::time::Duration::from_millis(5));
    }
}
