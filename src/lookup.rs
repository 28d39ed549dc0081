//! File Lookup Module
//!
//! Locates a file by name anywhere under the root directory and reads it.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ServerError};

// == File Lookup ==
/// Searches a directory tree for files by base name.
///
/// Only consulted on cache misses. When several directories hold a file with
/// the same name, whichever the traversal reaches first wins.
#[derive(Debug, Clone)]
pub struct FileLookup {
    root: PathBuf,
}

impl FileLookup {
    /// Creates a lookup rooted at `root`.
    ///
    /// The root is validated on every search, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // == Search ==
    /// Finds `file_name` under the root and returns its contents.
    ///
    /// Returns `Ok(None)` when no such file exists.
    ///
    /// # Errors
    /// - `ServerError::InvalidRootDirectory` if the root is not a directory
    /// - `ServerError::Walk` / `ServerError::Io` on traversal or read failures
    pub async fn search(&self, file_name: &str) -> Result<Option<Bytes>> {
        let root = self.root.clone();
        let name = file_name.to_string();

        let found = tokio::task::spawn_blocking(move || find_file(&root, &name))
            .await
            .map_err(|e| ServerError::Internal(format!("File search task failed: {}", e)))??;

        match found {
            Some(path) => {
                debug!(path = %path.display(), "Reading file from disk");
                let contents = tokio::fs::read(&path).await?;
                Ok(Some(Bytes::from(contents)))
            }
            None => Ok(None),
        }
    }
}

// == Find File ==
/// Walks `root` and returns the path of the first regular file named `file_name`.
pub fn find_file(root: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    if !root.is_dir() {
        return Err(ServerError::InvalidRootDirectory(root.to_path_buf()));
    }

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == file_name {
            return Ok(Some(entry.into_path()));
        }
    }

    Ok(None)
}
