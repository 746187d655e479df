//! Height/Weight ETL
//!
//! A batch ETL tool that gathers person records from CSV, NDJSON and XML
//! files, converts them to metric units and writes a single CSV

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod record;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use config::EtlConfig;
pub use error::EtlError;
pub use etl::{Extractor, Loader, Milestone, Pipeline, Transformer};
pub use record::{Record, Table};
pub use storage::{
    CsvReader, CsvWriter, DirectoryReader, NdjsonReader, ProgressLog, SourceFile, SourceFormat,
    XmlReader,
};
pub use transform::UnitConverter;
