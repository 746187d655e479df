//! CLI helper functions

use crate::{
    config::EtlConfig,
    etl::Pipeline,
    record::Record,
    storage::{CsvReader, CsvWriter, DirectoryReader, ProgressLog, SourceFile},
    transform::UnitConverter,
};
use eyre::Result;

/// The extractor a run will use for this configuration
///
/// The configured output is excluded by its resolved path, so an input in
/// the working directory that merely shares its file name is still read.
pub fn directory_reader(config: &EtlConfig) -> DirectoryReader {
    DirectoryReader::new(&config.working_dir)
        .csv_headers(config.csv_headers)
        .exclude(config.output_path())
}

/// Assemble the full pipeline for a configuration
///
/// Pipeline: DirectoryReader → UnitConverter → CsvWriter, with milestones
/// written to the configured progress log
pub fn build_pipeline(config: &EtlConfig) -> Pipeline<DirectoryReader, UnitConverter, CsvWriter> {
    Pipeline::new(
        directory_reader(config),
        UnitConverter,
        CsvWriter::new(config.output_path()),
    )
    .with_progress_log(ProgressLog::new(config.log_path()))
}

/// Run the ETL job, returning the number of records written
///
/// An unreadable working directory fails before any milestone is logged.
pub async fn run_etl(config: &EtlConfig) -> Result<usize> {
    log::info!("Reading inputs from {}", config.working_dir.display());
    log::debug!("Output file: {}", config.output_path().display());
    log::debug!("Progress log: {}", config.log_path().display());

    directory_reader(config).check()?;
    build_pipeline(config).run().await
}

/// List the input files a run would extract, without writing anything
pub fn discover_sources(config: &EtlConfig) -> Result<Vec<SourceFile>> {
    directory_reader(config).discover()
}

/// Read back the records written by the last run
pub fn read_output(config: &EtlConfig) -> Result<Vec<Record>> {
    CsvReader::new(config.output_path()).read()
}

/// Render records as a plain text table under a "Transformed Data" title
pub fn format_table(records: &[Record]) -> String {
    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once(Record::COLUMNS[0].len()))
        .max()
        .unwrap_or_default();

    let mut table = String::from("Transformed Data\n");
    table.push_str(&format!(
        "{:>5}  {:<name_width$}  {:>8}  {:>8}\n",
        "",
        Record::COLUMNS[0],
        Record::COLUMNS[1],
        Record::COLUMNS[2],
    ));
    for (index, record) in records.iter().enumerate() {
        table.push_str(&format!(
            "{:>5}  {:<name_width$}  {:>8.2}  {:>8.2}\n",
            index, record.name, record.height, record.weight,
        ));
    }
    table
}
