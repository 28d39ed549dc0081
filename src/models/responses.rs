//! Response DTOs for the image server
//!
//! Defines the JSON bodies of the auxiliary endpoints.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache counters and occupancy
    #[serde(flatten)]
    pub cache: CacheStats,
    /// Whether hits are written back into the cache
    pub rewrite_on_hit: bool,
    /// Seconds since the server state was created
    pub uptime_secs: u64,
}

impl StatsResponse {
    pub fn new(cache: CacheStats, rewrite_on_hit: bool, uptime_secs: u64) -> Self {
        Self {
            cache,
            rewrite_on_hit,
            uptime_secs,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
