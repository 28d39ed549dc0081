//! Error types for the image server
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the cache core.
///
/// Only construction can fail; reads and writes are total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity was zero
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Server Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Request path does not name a file
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// File extension not in the allow-list
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No file with that name under the root directory
    #[error("File not found: {0}")]
    NotFound(String),

    /// Only GET is served
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Root directory missing or not a directory
    #[error("Bad directory path: {}", .0.display())]
    InvalidRootDirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// True for faults that belong in the error log rather than client mistakes.
    pub fn is_internal(&self) -> bool {
        !matches!(
            self,
            ServerError::BadRequest(_)
                | ServerError::Forbidden(_)
                | ServerError::NotFound(_)
                | ServerError::MethodNotAllowed(_)
        )
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body: &'static str = match status {
            StatusCode::BAD_REQUEST => "<h1>Bad request.</h1>",
            StatusCode::FORBIDDEN => "<h1>Forbidden.</h1>",
            StatusCode::NOT_FOUND => "<h1>Not found.</h1>",
            StatusCode::METHOD_NOT_ALLOWED => "<h1>Method not allowed.</h1>",
            _ => "<h1>Internal server error.</h1>",
        };

        (status, [(header::CONTENT_TYPE, "text/html")], body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image server.
pub type Result<T> = std::result::Result<T, ServerError>;
