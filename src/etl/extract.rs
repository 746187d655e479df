//! Extractor trait for reading records from a source

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to pull items out of sources like:
/// - A single CSV, NDJSON or XML file
/// - A directory of such files
///
/// # Example
/// ```no_run
/// use heightweight_etl::etl::Extractor;
/// use heightweight_etl::Record;
/// use eyre::Result;
///
/// struct FixedExtractor(Vec<Record>);
///
/// impl Extractor for FixedExtractor {
///     type Item = Record;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
