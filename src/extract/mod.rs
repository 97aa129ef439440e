//! Extraction stage: from record stubs to extracted records
//!
//! Detail pages are fetched concurrently through the run's shared fetcher.
//! A stub whose page cannot be fetched or parsed is logged and dropped; it
//! never reaches the output and never stops the batch.

mod fields;

pub use fields::{itemprop, parse_detail, DetailFields, TOOK_OFFICE_TRIGGER};

use crate::crawler::RunContext;
use crate::record::{ExtractedRecord, RecordStub};
use crate::PageResult;
use async_stream::stream;
use futures::future::join_all;
use futures::Stream;

/// Extracts records from `stubs`
///
/// When `limit` is set, only the first `limit` stubs are considered at all.
/// Nothing is fetched until the stream is first polled; the whole batch is
/// then fetched concurrently and successes are yielded in stub order.
///
/// # Arguments
///
/// * `ctx` - The run context
/// * `stubs` - Stubs produced by the crawl stage
/// * `limit` - Optional hard ceiling on the number of stubs considered
///
/// # Example
///
/// ```no_run
/// use futures::StreamExt;
/// use stratalis::config::Config;
/// use stratalis::crawler::{crawl, RunContext};
/// use stratalis::extract::extract;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = RunContext::from_config(&Config::default())?;
/// let stubs = crawl(&ctx, &Url::parse(stratalis::DIRECTORY_URL)?, None).await?;
/// let records = extract(&ctx, &stubs, Some(10));
/// futures::pin_mut!(records);
/// while let Some(record) = records.next().await {
///     println!("{} ({})", record.mayor_name, record.town);
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract<'a>(
    ctx: &'a RunContext,
    stubs: &'a [RecordStub],
    limit: Option<usize>,
) -> impl Stream<Item = ExtractedRecord> + Send + 'a {
    let considered = match limit {
        Some(limit) => &stubs[..limit.min(stubs.len())],
        None => stubs,
    };

    stream! {
        tracing::info!("Extracting {} mayor pages", considered.len());
        let results = join_all(considered.iter().map(|stub| extract_one(ctx, stub))).await;

        for (stub, result) in considered.iter().zip(results) {
            match result {
                Ok(record) => yield record,
                Err(e) => {
                    tracing::error!(
                        "Failed to extract mayor info from {}, {}: {}",
                        stub,
                        e.kind(),
                        e
                    );
                }
            }
        }
    }
}

/// Fetches and parses the detail page of a single stub
///
/// # Returns
///
/// * `Ok(ExtractedRecord)` - The stub's metadata plus the page fields
/// * `Err(PageError)` - The page could not be fetched, or was empty
pub async fn extract_one(ctx: &RunContext, stub: &RecordStub) -> PageResult<ExtractedRecord> {
    tracing::info!("Extracting content for {}", stub.detail_link);

    let body = ctx.fetcher.fetch(&stub.detail_link).await?;
    let fields = parse_detail(&body, &stub.detail_link)?;

    Ok(ExtractedRecord {
        region: stub.group.clone(),
        town: stub.subgroup.clone(),
        mayor_name: stub.label.clone(),
        took_office: fields.took_office,
        phone: fields.phone,
        email: fields.email,
        town_hall_address: fields.address,
    })
}
