//! Directory-based extraction across every supported file format

use super::{CsvReader, NdjsonReader, XmlReader};
use crate::error::EtlError;
use crate::etl::Extractor;
use crate::record::{Record, Table};

use eyre::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Input file formats, in the order they are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Xml,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [SourceFormat::Csv, SourceFormat::Json, SourceFormat::Xml];

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
            SourceFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A discovered input file and the format it will be read as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub format: SourceFormat,
}

/// Read records from every CSV, JSON and XML file in a directory
///
/// Discovery is non-recursive. Files are processed CSV first, then JSON,
/// then XML, sorted by name within each group. A CSV file that is the same
/// file as a path passed to [`DirectoryReader::exclude`] is skipped, which
/// keeps the pipeline from reading back its own output.
pub struct DirectoryReader {
    path: PathBuf,
    excluded: Vec<PathBuf>,
    csv_headers: bool,
}

impl DirectoryReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            excluded: Vec::new(),
            csv_headers: true,
        }
    }

    /// Skip the CSV file at this path
    ///
    /// Relative paths resolve against the current directory, not the one
    /// being read. A path that does not exist yet matches nothing.
    pub fn exclude(mut self, path: impl AsRef<Path>) -> Self {
        self.excluded.push(path.as_ref().to_path_buf());
        self
    }

    /// Whether CSV files carry a header row
    pub fn csv_headers(mut self, has_headers: bool) -> Self {
        self.csv_headers = has_headers;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fail with [`EtlError::Discovery`] unless the directory can be listed
    pub fn check(&self) -> Result<()> {
        std::fs::read_dir(&self.path).map_err(|e| EtlError::Discovery {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// List input files in processing order
    pub fn discover(&self) -> Result<Vec<SourceFile>> {
        self.check()?;

        let mut sources = Vec::new();
        for format in SourceFormat::ALL {
            let mut paths = self.glob(format)?;
            paths.sort();

            if format == SourceFormat::Csv {
                paths.retain(|path| !self.is_excluded(path));
            }

            log::debug!("Found {} {} file(s) in {}", paths.len(), format, self.path.display());
            sources.extend(paths.into_iter().map(|path| SourceFile { path, format }));
        }

        Ok(sources)
    }

    fn glob(&self, format: SourceFormat) -> Result<Vec<PathBuf>> {
        let dir = glob::Pattern::escape(&self.path.to_string_lossy());
        let pattern = format!("{}/*.{}", dir, format.extension());

        let discovery_error = |reason: String| EtlError::Discovery {
            path: self.path.clone(),
            reason,
        };

        let mut paths = Vec::new();
        for entry in glob::glob(&pattern).map_err(|e| discovery_error(e.to_string()))? {
            let path = entry.map_err(|e| discovery_error(e.to_string()))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Ok(path) = std::fs::canonicalize(path) else {
            return false;
        };
        self.excluded
            .iter()
            .filter_map(|excluded| std::fs::canonicalize(excluded).ok())
            .any(|excluded| excluded == path)
    }

    /// Read a single discovered file with the extractor for its format
    pub fn read_source(&self, source: &SourceFile) -> Result<Table> {
        match source.format {
            SourceFormat::Csv => CsvReader::new(&source.path)
                .with_headers(self.csv_headers)
                .read(),
            SourceFormat::Json => NdjsonReader::new(&source.path).read(),
            SourceFormat::Xml => XmlReader::new(&source.path).read(),
        }
    }

    /// Read all discovered files into one table
    pub fn read_all(&self) -> Result<Table> {
        let mut records = Vec::new();

        for source in self.discover()? {
            let table = self.read_source(&source)?;
            log::info!(
                "Extracted {} record(s) from {}",
                table.len(),
                source.path.display()
            );
            records.extend(table);
        }

        Ok(records)
    }
}

// Implement Extractor trait for reading from directories
impl Extractor for DirectoryReader {
    type Item = Record;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read_all()
    }
}
