//! File system storage operations
//!
//! This module handles all file I/O operations including:
//! - CSV reading and writing
//! - NDJSON and XML reading
//! - Directory-wide discovery across formats
//! - The append-only progress log

mod csv_file;
mod directory;
mod ndjson;
mod progress_log;
mod xml;

pub use csv_file::{CsvReader, CsvWriter};
pub use directory::{DirectoryReader, SourceFile, SourceFormat};
pub use ndjson::NdjsonReader;
pub use progress_log::{ProgressLog, TIMESTAMP_FORMAT};
pub use xml::XmlReader;
