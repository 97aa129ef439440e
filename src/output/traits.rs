//! Output sink trait and error types
//!
//! A sink receives extracted records one at a time, in the order the
//! extraction stage yields them, and is finished once the stream ends.

use crate::record::ExtractedRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for extracted records
pub trait RecordSink {
    /// Persists one record
    fn write_record(&mut self, record: &ExtractedRecord) -> OutputResult<()>;

    /// Flushes anything buffered
    ///
    /// Called once, after the last record.
    fn finish(&mut self) -> OutputResult<()>;

    /// Number of records written so far
    fn records_written(&self) -> usize;
}

/// Sink keeping records in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ExtractedRecord>,
    pub finished: bool,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &ExtractedRecord) -> OutputResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }

    fn records_written(&self) -> usize {
        self.records.len()
    }
}
