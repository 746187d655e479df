//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming data items
///
/// Implementors define a per-item conversion; batches go through
/// [`Transformer::transform_many`], which stops at the first failure.
///
/// # Example
/// ```
/// use heightweight_etl::etl::Transformer;
/// use heightweight_etl::Record;
/// use eyre::Result;
///
/// struct Uppercase;
///
/// impl Transformer for Uppercase {
///     type Input = Record;
///     type Output = Record;
///
///     fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
///         input.name = input.name.to_uppercase();
///         Ok(input)
///     }
/// }
///
/// let out = Uppercase.transform(Record::new("alice", 70.0, 150.0)).unwrap();
/// assert_eq!(out.name, "ALICE");
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}
