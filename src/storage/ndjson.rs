//! NDJSON (Newline Delimited JSON) file operations

use crate::error::EtlError;
use crate::etl::Extractor;
use crate::record::{Record, Table};

use eyre::Result;
use std::path::Path;

/// Read records from an NDJSON file, one JSON object per line
///
/// Blank lines are skipped and keys other than `name`, `height` and
/// `weight` are ignored.
pub struct NdjsonReader {
    path: std::path::PathBuf,
}

impl NdjsonReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all lines as records
    pub fn read(&self) -> Result<Table> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| EtlError::Read {
            path: self.path.clone(),
            source,
        })?;

        let records = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| self.parse_line(index as u64 + 1, line))
            .collect::<Result<Table>>()?;

        log::debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn parse_line(&self, line_number: u64, line: &str) -> Result<Record> {
        let record: Record = serde_json::from_str(line)
            .map_err(|e| EtlError::parse(&self.path, Some(line_number), e))?;
        record
            .check_finite()
            .map_err(|reason| EtlError::parse(&self.path, Some(line_number), reason))?;
        Ok(record)
    }
}

// Implement Extractor trait for reading NDJSON files

impl Extractor for NdjsonReader {
    type Item = Record;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}
