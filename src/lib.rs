//! Mini Image Server - A minimal static image server
//!
//! Serves image files by name from a directory tree, keeping recently
//! requested files in a bounded concurrent LRU cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod error_log;
pub mod lookup;
pub mod models;

pub use api::AppState;
pub use cache::{ConcurrentLruCache, FileCache};
pub use config::Config;
