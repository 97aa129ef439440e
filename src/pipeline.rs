//! End-to-end run: crawl, extract, write, summarize

use crate::crawler::{crawl, RunContext};
use crate::extract::extract;
use crate::output::{RecordSink, RunSummary};
use crate::StratalisError;
use chrono::Utc;
use futures::StreamExt;
use url::Url;

/// Runs both stages and writes every extracted record to `sink`
///
/// `limit` is applied twice: as the crawl's soft ceiling and as the
/// extraction's hard ceiling.
///
/// # Returns
///
/// * `Ok(RunSummary)` - Counts for the run, also logged
/// * `Err(StratalisError)` - The directory page failed, or the sink could not be written
pub async fn run(
    ctx: &RunContext,
    directory_url: &Url,
    limit: Option<usize>,
    sink: &mut dyn RecordSink,
) -> Result<RunSummary, StratalisError> {
    let started_at = Utc::now();

    let stubs = crawl(ctx, directory_url, limit).await?;
    let stubs_considered = limit.map_or(stubs.len(), |limit| limit.min(stubs.len()));

    let records = extract(ctx, &stubs, limit);
    futures::pin_mut!(records);

    while let Some(record) = records.next().await {
        sink.write_record(&record)?;
    }
    sink.finish()?;

    let summary = RunSummary {
        started_at,
        finished_at: Utc::now(),
        stubs_discovered: stubs.len(),
        stubs_considered,
        records_extracted: sink.records_written(),
    };
    summary.log();

    Ok(summary)
}
