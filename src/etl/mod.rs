//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building data pipelines
//! that extract records from sources, transform them, and load them to
//! destinations, plus the [`Pipeline`] driver that sequences the stages.

mod extract;
mod load;
mod milestone;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use milestone::Milestone;
pub use pipeline::Pipeline;
pub use transform::Transformer;
