//! CSV output
//!
//! The header row is written as soon as the sink is created, so a run that
//! extracts nothing still leaves a valid file with the column names.

use crate::output::traits::{OutputResult, RecordSink};
use crate::record::{ExtractedRecord, RecordField};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records as CSV rows in [`RecordField::ALL`] order
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path` and writes the header row
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps `writer` and writes the header row
    pub fn new(writer: W) -> OutputResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(RecordField::headers())?;
        writer.flush()?;

        Ok(Self { writer, written: 0 })
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &ExtractedRecord) -> OutputResult<()> {
        self.writer.serialize(record)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn records_written(&self) -> usize {
        self.written
    }
}
