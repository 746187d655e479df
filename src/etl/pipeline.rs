//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Milestone, Transformer};
use crate::storage::ProgressLog;
use eyre::Result;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// When a [`ProgressLog`] is attached, every [`Milestone`] is appended to it
/// as the run reaches it. A failing stage ends the run immediately, so the
/// log shows progress up to the start of the stage that failed.
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use heightweight_etl::etl::Pipeline;
/// use heightweight_etl::storage::{CsvWriter, DirectoryReader, ProgressLog};
/// use heightweight_etl::transform::UnitConverter;
/// # use eyre::Result;
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(
///     DirectoryReader::new(".").exclude("transformed_data.csv"),
///     UnitConverter,
///     CsvWriter::new("transformed_data.csv"),
/// )
/// .with_progress_log(ProgressLog::new("log_file.txt"));
///
/// let count = pipeline.run().await?;
/// println!("Processed {} records", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
    progress: Option<ProgressLog>,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            progress: None,
        }
    }

    /// Record milestones to the given progress log
    pub fn with_progress_log(mut self, progress: ProgressLog) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn progress_log(&self) -> Option<&ProgressLog> {
        self.progress.as_ref()
    }

    fn milestone(&self, milestone: Milestone) -> Result<()> {
        log::debug!("Milestone: {}", milestone);
        if let Some(progress) = &self.progress {
            progress.log(milestone.message())?;
        }
        Ok(())
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract items from source
    /// 2. Transform each item
    /// 3. Load items to destination
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns the first error from any stage or from the progress log
    pub async fn run(&self) -> Result<usize> {
        self.milestone(Milestone::JobStarted)?;
        log::info!("Starting ETL pipeline");

        // Extract
        self.milestone(Milestone::ExtractStarted)?;
        let items = self.extractor.extract().await?;
        log::info!("Extracted {} items", items.len());
        self.milestone(Milestone::ExtractEnded)?;

        if items.is_empty() {
            log::warn!("No items extracted, loading an empty table");
        }

        // Transform
        self.milestone(Milestone::TransformStarted)?;
        let transformed = self.transformer.transform_many(items)?;
        log::info!("Transformed {} items", transformed.len());
        self.milestone(Milestone::TransformEnded)?;

        // Load
        self.milestone(Milestone::LoadStarted)?;
        let count = self.loader.load(transformed).await?;
        log::info!("Loaded {} items", count);
        self.milestone(Milestone::LoadEnded)?;

        self.milestone(Milestone::JobEnded)?;
        Ok(count)
    }
}
