//! Record types flowing through the pipeline
//!
//! A [`RecordStub`] is what the crawl stage learns about a mayor from a
//! listing page. An [`ExtractedRecord`] is the full row built from the stub
//! and the mayor's own page.

mod extracted;
mod stub;

pub use extracted::{ExtractedRecord, RecordField};
pub use stub::RecordStub;
