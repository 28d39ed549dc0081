//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::error::CacheError;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of files the cache can hold
    pub cache_capacity: usize,
    /// Address the HTTP server binds to
    pub server_host: IpAddr,
    /// HTTP server port
    pub server_port: u16,
    /// Directory tree searched for requested files
    pub root_dir: PathBuf,
    /// File that receives one line per unhandled fault
    pub error_log_path: PathBuf,
    /// File extensions (without the dot) that may be served
    pub allowed_extensions: Vec<String>,
    /// Write the value back into the cache after every hit
    pub rewrite_on_hit: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached files (default: 10)
    /// - `SERVER_HOST` - Bind address (default: 127.0.0.1)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `ROOT_DIR` - Directory to serve from (default: root)
    /// - `ERROR_LOG_PATH` - Error log file (default: errLogFile.txt)
    /// - `ALLOWED_EXTENSIONS` - Comma-separated list (default: gif)
    /// - `REWRITE_ON_HIT` - Re-write cached values after a hit (default: false)
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` when `CACHE_CAPACITY` is set
    /// but is not a positive integer.
    pub fn from_env() -> Result<Self, CacheError> {
        let defaults = Self::default();

        Ok(Self {
            cache_capacity: parse_capacity(
                env::var("CACHE_CAPACITY").ok().as_deref(),
                defaults.cache_capacity,
            )?,
            server_host: parse_var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            root_dir: env::var("ROOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            error_log_path: env::var("ERROR_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.error_log_path),
            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .ok()
                .map(|v| parse_extensions(&v))
                .filter(|exts| !exts.is_empty())
                .unwrap_or(defaults.allowed_extensions),
            rewrite_on_hit: parse_var("REWRITE_ON_HIT").unwrap_or(defaults.rewrite_on_hit),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 10,
            server_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            server_port: 8080,
            root_dir: PathBuf::from("root"),
            error_log_path: PathBuf::from("errLogFile.txt"),
            allowed_extensions: vec!["gif".to_string()],
            rewrite_on_hit: false,
        }
    }
}

// Unset means default; anything else must be a positive integer.
fn parse_capacity(raw: Option<&str>, default: usize) -> Result<usize, CacheError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(CacheError::InvalidConfiguration(format!(
            "CACHE_CAPACITY must be a positive integer, got {:?}",
            raw
        ))),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

// Accepts "gif, .png" style lists; leading dots are stripped.
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}
