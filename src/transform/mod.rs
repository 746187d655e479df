//! Transform implementations for person records

mod unit_converter;

pub use unit_converter::{UnitConverter, round_to};
