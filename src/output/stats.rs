//! Run statistics
//!
//! Per-item failures are only visible in the logs; the summary is the one
//! place where the gap between discovered and extracted mayors shows up.

use chrono::{DateTime, Utc};

/// Counts gathered over one run of the pipeline
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Stubs returned by the crawl stage
    pub stubs_discovered: usize,

    /// Stubs handed to the extraction stage after the limit
    pub stubs_considered: usize,

    /// Records written to the sink
    pub records_extracted: usize,
}

impl RunSummary {
    /// Considered stubs that produced no record
    pub fn records_dropped(&self) -> usize {
        self.stubs_considered.saturating_sub(self.records_extracted)
    }

    /// Share of considered stubs that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.stubs_considered == 0 {
            return 0.0;
        }
        (self.records_extracted as f64 / self.stubs_considered as f64) * 100.0
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Emits the summary line
    pub fn log(&self) {
        tracing::info!(
            "Run finished in {}s: discovered {} mayors, extracted {} of {} ({:.1}%), dropped {}",
            self.duration_seconds(),
            self.stubs_discovered,
            self.records_extracted,
            self.stubs_considered,
            self.success_rate(),
            self.records_dropped()
        );
    }
}
