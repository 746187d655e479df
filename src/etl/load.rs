//! Loader trait for persisting records to a destination

use eyre::Result;

/// Loader trait for loading data to a destination
///
/// # Example
/// ```no_run
/// use heightweight_etl::etl::Loader;
/// use heightweight_etl::Record;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = Record;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns an error if loading fails (permissions, disk full, invalid path)
    fn load(&self, items: Vec<Self::Item>) -> impl std::future::Future<Output = Result<usize>> + Send;
}
