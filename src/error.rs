//! Error types raised by the ETL stages
//!
//! Stages return [`eyre::Result`]; the typed [`EtlError`] travels inside the
//! report so callers can `downcast_ref::<EtlError>()` to tell failures apart.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// Working directory cannot be listed, or the glob pattern is invalid
    #[error("Failed to discover input files in {}: {reason}", .path.display())]
    Discovery { path: PathBuf, reason: String },

    /// An input file cannot be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed row, line or element in an input file
    #[error(
        "Failed to parse {}{}: {reason}",
        .path.display(),
        .line.map(|l| format!(" (line {l})")).unwrap_or_default()
    )]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },

    /// A record cannot be converted
    #[error("Failed to transform record {name:?}: {reason}")]
    Transform { name: String, reason: String },

    /// The output file cannot be written
    #[error("Failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    /// The progress log cannot be appended to
    #[error("Failed to append to progress log {}: {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EtlError {
    pub(crate) fn parse(path: impl Into<PathBuf>, line: Option<u64>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
