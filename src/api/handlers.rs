//! API Handlers
//!
//! HTTP request handlers for file dispatch and the auxiliary endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::cache::FileCache;
use crate::config::Config;
use crate::error::{CacheError, Result, ServerError};
use crate::error_log::ErrorLog;
use crate::lookup::FileLookup;
use crate::models::{FileRequest, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache is owned here and handed to handlers by reference count; there is
/// no process-wide instance.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe file cache
    pub cache: Arc<FileCache>,
    /// Disk fallback for cache misses
    pub lookup: FileLookup,
    /// Fault log shared by all requests
    pub error_log: Arc<ErrorLog>,
    /// Extensions that may be served
    pub allowed_extensions: Arc<[String]>,
    /// Write values back into the cache after a hit
    pub rewrite_on_hit: bool,
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: FileCache, config: &Config) -> Self {
        Self {
            cache: Arc::new(cache),
            lookup: FileLookup::new(config.root_dir.clone()),
            error_log: Arc::new(ErrorLog::new(config.error_log_path.clone())),
            allowed_extensions: config.allowed_extensions.clone().into(),
            rewrite_on_hit: config.rewrite_on_hit,
            started_at: Instant::now(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Fails when the configured cache capacity is zero.
    pub fn from_config(config: &Config) -> std::result::Result<Self, CacheError> {
        let cache = FileCache::new(config.cache_capacity)?;
        Ok(Self::new(cache, config))
    }
}

/// Fallback handler serving files by name.
///
/// Client errors are answered directly; internal faults are also appended to
/// the error log.
pub async fn file_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    let response = match serve_file(&state, &method, path).await {
        Ok(response) => response,
        Err(err) => {
            if err.is_internal() {
                error!(%method, path, error = %err, "Request failed");
                state.error_log.append(&err.to_string()).await;
            } else {
                warn!(%method, path, error = %err, "Request rejected");
            }
            err.into_response()
        }
    };

    info!(
        %method,
        path,
        status = response.status().as_u16(),
        "Request handled"
    );
    response
}

async fn serve_file(state: &AppState, method: &Method, path: &str) -> Result<Response> {
    if *method != Method::GET {
        return Err(ServerError::MethodNotAllowed(method.to_string()));
    }

    let request = FileRequest::parse(path, &state.allowed_extensions)?;

    if let Some(bytes) = state.cache.try_read(request.file_name.as_str()) {
        debug!(file = %request.file_name, "Cache hit");
        if state.rewrite_on_hit {
            state.cache.write(request.file_name.clone(), bytes.clone());
        }
        return Ok(file_response(bytes, request.content_type(), "HIT"));
    }

    debug!(file = %request.file_name, "Cache miss");
    let bytes = state
        .lookup
        .search(&request.file_name)
        .await?
        .ok_or_else(|| ServerError::NotFound(request.file_name.clone()))?;

    state.cache.write(request.file_name.clone(), bytes.clone());
    Ok(file_response(bytes, request.content_type(), "MISS"))
}

fn file_response(bytes: Bytes, content_type: &'static str, cache_status: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (HeaderName::from_static("x-cache"), cache_status),
        ],
        bytes,
    )
        .into_response()
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache.stats(),
        state.rewrite_on_hit,
        state.started_at.elapsed().as_secs(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
