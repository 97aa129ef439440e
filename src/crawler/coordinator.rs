//! Crawl orchestration
//!
//! This module turns the directory page into the flat list of stubs the
//! extraction stage works from:
//! - Fetching and parsing the directory page (the only fatal step)
//! - Walking every region concurrently through the shared fetcher
//! - Dropping regions whose walk failed, keeping discovery order
//! - Applying the soft result ceiling

use crate::crawler::context::RunContext;
use crate::crawler::parser::{parse_directory, Region};
use crate::crawler::walker::walk_region;
use crate::record::RecordStub;
use crate::StratalisError;
use futures::future::join_all;
use url::Url;

/// Runs the crawl stage
///
/// Every region is walked at once. Results are then accumulated in region
/// discovery order, stopping as soon as the running total exceeds `limit`.
/// The last accepted region is always kept whole, so the result may exceed
/// `limit` by up to one region's worth of stubs.
///
/// # Arguments
///
/// * `ctx` - The run context
/// * `directory_url` - The page listing every region
/// * `limit` - Optional soft ceiling on the number of stubs
///
/// # Returns
///
/// * `Ok(Vec<RecordStub>)` - Stubs of every region that could be walked
/// * `Err(StratalisError)` - The directory page could not be fetched or parsed
///
/// # Example
///
/// ```no_run
/// use stratalis::config::Config;
/// use stratalis::crawler::{crawl, RunContext};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = RunContext::from_config(&Config::default())?;
/// let directory = Url::parse(stratalis::DIRECTORY_URL)?;
/// let stubs = crawl(&ctx, &directory, Some(100)).await?;
/// println!("{} mayors found", stubs.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    ctx: &RunContext,
    directory_url: &Url,
    limit: Option<usize>,
) -> Result<Vec<RecordStub>, StratalisError> {
    tracing::info!("Fetching region directory: {}", directory_url);
    let body = ctx.fetcher.fetch(directory_url).await?;
    let regions = parse_directory(&body, directory_url)?;
    tracing::info!("Found {} regions", regions.len());

    let stubs = walk_regions(ctx, &regions, limit).await;

    tracing::info!("Found a total of {} region listings", stubs.len());
    Ok(stubs)
}

/// Walks `regions` concurrently and flattens the surviving results
pub async fn walk_regions(
    ctx: &RunContext,
    regions: &[Region],
    limit: Option<usize>,
) -> Vec<RecordStub> {
    let results = join_all(regions.iter().map(|region| walk_region(ctx, region, true))).await;

    let mut flattened = Vec::new();
    for (region, result) in regions.iter().zip(results) {
        match result {
            Ok(stubs) => flattened.extend(stubs),
            Err(e) => {
                tracing::error!(
                    "Failed to gather listings for {} ({}), error: {}",
                    region.name,
                    region.root_url,
                    e
                );
                continue;
            }
        }

        if limit.is_some_and(|limit| flattened.len() > limit) {
            tracing::debug!("Result limit reached after region {}", region.name);
            break;
        }
    }

    flattened
}
