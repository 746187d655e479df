//! Typed person record shared by every pipeline stage

use serde::{Deserialize, Serialize};

/// One person: name, height and weight
///
/// Extractors produce heights in inches and weights in pounds;
/// [`UnitConverter`](crate::transform::UnitConverter) turns them into
/// meters and kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub height: f64,
    pub weight: f64,
}

/// An ordered collection of records sharing the [`Record`] schema
pub type Table = Vec<Record>;

impl Record {
    /// Column names, in output order
    pub const COLUMNS: [&'static str; 3] = ["name", "height", "weight"];

    pub fn new(name: impl Into<String>, height: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            height,
            weight,
        }
    }

    /// Reject `NaN` and infinities, which parse as valid floats
    pub(crate) fn check_finite(&self) -> Result<(), String> {
        if !self.height.is_finite() {
            return Err(format!("height for {:?} is not a finite number", self.name));
        }
        if !self.weight.is_finite() {
            return Err(format!("weight for {:?} is not a finite number", self.name));
        }
        Ok(())
    }
}
