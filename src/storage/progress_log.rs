//! Append-only, timestamped progress log

use crate::error::EtlError;
use eyre::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// chrono format for log timestamps, e.g. `2026-Oct-16-14:03:59`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Writes `"<timestamp>,<message>"` lines to a log file
///
/// The file is opened in append mode for every entry and closed straight
/// after, so no handle outlives a call. Entries from concurrent callers
/// are serialized and never interleave.
pub struct ProgressLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ProgressLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry stamped with the current local time
    pub fn log(&self, message: &str) -> Result<()> {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let line = format!("{},{}\n", timestamp, message);

        // Poisoned only if another writer panicked; the file is still whole
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| EtlError::LogWrite {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(line.as_bytes())
            .map_err(|source| EtlError::LogWrite {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }

    /// Read back all entries as `(timestamp, message)` pairs
    ///
    /// A missing log file has no entries.
    pub fn read_entries(&self) -> Result<Vec<(String, String)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read progress log: {}", self.path.display()))?;

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once(',') {
                Some((timestamp, message)) => (timestamp.to_string(), message.to_string()),
                None => (String::new(), line.to_string()),
            })
            .collect())
    }
}
