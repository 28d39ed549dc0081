//! Request models for the image server
//!
//! Turns a raw request path into a validated file name.

use std::path::Path;

use crate::error::{Result, ServerError};

/// A validated request for a single file.
///
/// # Fields
/// - `file_name`: base name of the request path, percent-decoded; used as the cache key
/// - `extension`: extension of `file_name` without the dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub file_name: String,
    pub extension: String,
}

impl FileRequest {
    /// Parses and validates a request path such as `/images/cat.gif`.
    ///
    /// Only the last path segment is kept. Extensions are compared
    /// case-sensitively against `allowed_extensions`.
    ///
    /// # Errors
    /// - `ServerError::BadRequest` for an empty, undecodable or dot-only name
    /// - `ServerError::Forbidden` for a missing or disallowed extension
    pub fn parse(path: &str, allowed_extensions: &[String]) -> Result<Self> {
        let raw_name = path.rsplit('/').next().unwrap_or_default();

        let file_name = urlencoding::decode(raw_name)
            .map_err(|_| ServerError::BadRequest(format!("Undecodable path: {}", path)))?
            .into_owned();

        if file_name.is_empty() || file_name == "." || file_name == ".." {
            return Err(ServerError::BadRequest(format!(
                "No file name in path: {}",
                path
            )));
        }
        if file_name.contains('/') || file_name.contains('\\') {
            return Err(ServerError::BadRequest(format!(
                "File name contains a path separator: {}",
                file_name
            )));
        }

        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();

        if extension.is_empty() || !allowed_extensions.iter().any(|e| *e == extension) {
            return Err(ServerError::Forbidden(file_name));
        }

        Ok(Self {
            file_name,
            extension,
        })
    }

    /// MIME type to serve this file with.
    pub fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            "gif" => "image/gif",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            "ico" => "image/x-icon",
            _ => "application/octet-stream",
        }
    }
}
