//! Cache Module
//!
//! Provides a bounded in-memory LRU cache safe for concurrent access.

mod concurrent;
mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use concurrent::ConcurrentLruCache;
pub use entry::CacheEntry;
pub use lru::{LruList, NodeId};
pub use stats::{CacheStats, StatsCounters};
pub use store::LruStore;

/// Cache of raw file contents keyed by file name.
pub type FileCache = ConcurrentLruCache<String, bytes::Bytes>;
