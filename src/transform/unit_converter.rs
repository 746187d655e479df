//! Imperial to metric unit conversion
//!
//! Heights arrive in inches and weights in pounds; both leave in metric
//! units rounded to two decimal places.

use crate::error::EtlError;
use crate::etl::Transformer;
use crate::record::Record;
use eyre::Result;

/// Meters per inch
pub const METERS_PER_INCH: f64 = 0.0254;

/// Kilograms per pound
pub const KILOGRAMS_PER_POUND: f64 = 0.45359237;

/// Round to `decimals` places, halves away from zero
///
/// This differs from half-to-even rounding (as in numpy's `round`), so a
/// product landing exactly on a half can come out one hundredth higher.
/// Most products are not exact halves in binary, and those agree.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Transformer converting height to meters and weight to kilograms
///
/// Converting a record that is already metric shrinks it again, so each
/// record must pass through exactly once.
///
/// # Example
/// ```
/// use heightweight_etl::Record;
/// use heightweight_etl::etl::Transformer;
/// use heightweight_etl::transform::UnitConverter;
///
/// let output = UnitConverter.transform(Record::new("Alice", 70.0, 150.0)).unwrap();
/// assert_eq!(output.height, 1.78);
/// assert_eq!(output.weight, 68.04);
/// ```
pub struct UnitConverter;

impl Transformer for UnitConverter {
    type Input = Record;
    type Output = Record;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        input.check_finite().map_err(|reason| EtlError::Transform {
            name: input.name.clone(),
            reason,
        })?;

        Ok(Record {
            height: round_to(input.height * METERS_PER_INCH, 2),
            weight: round_to(input.weight * KILOGRAMS_PER_POUND, 2),
            name: input.name,
        })
    }
}
