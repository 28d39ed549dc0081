//! Error Log Module
//!
//! Append-only file log for faults raised while serving requests.

use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::error;

// == Error Log ==
/// Appends one line per fault to a log file.
///
/// Writers are serialized by their own mutex, unrelated to the cache lock.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }

    // == Append ==
    /// Writes `<timestamp> <message>` as a single line.
    ///
    /// Failures are reported through tracing and never propagated.
    pub async fn append(&self, message: &str) {
        let line = format_line(&chrono::Utc::now().to_rfc3339(), message);

        let _guard = self.lock.lock().await;
        if let Err(e) = self.write_line(&line).await {
            error!(path = %self.path.display(), error = %e, "Failed to append to error log");
        }
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

fn format_line(timestamp: &str, message: &str) -> String {
    let flat: String = message
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("{} {}\n", timestamp, flat)
}
