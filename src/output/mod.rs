//! Output module for persisting extracted records
//!
//! This module handles:
//! - The [`RecordSink`] seam the pipeline writes through
//! - CSV output with a fixed header row
//! - Run statistics and the closing summary line

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use stats::RunSummary;
pub use traits::{OutputError, OutputResult, RecordSink};
#[cfg(test)]
pub(crate) use traits::MemorySink;
