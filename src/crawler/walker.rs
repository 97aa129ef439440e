//! Region walker
//!
//! Walks one region: its root listing page, then (concurrently) the
//! supplementary pages planned from the root page's pagination. A failing
//! supplementary page only loses its own entries; a failing root page fails
//! the whole walk.

use crate::crawler::context::RunContext;
use crate::crawler::pagination::{plan_pagination, MAX_SUPPLEMENTARY_PAGES};
use crate::crawler::parser::{parse_listing, Region};
use crate::record::RecordStub;
use crate::PageResult;
use futures::future::{join_all, BoxFuture, FutureExt};

/// Collects the stubs of a region
///
/// Supplementary pages are walked with `include_pagination = false`, so the
/// recursion never goes deeper than one level below the root page.
///
/// # Ordering
///
/// Supplementary pages come first, in plan order, followed by the root
/// page's own entries. Within a page, entries keep their page order.
///
/// # Arguments
///
/// * `ctx` - The run context
/// * `region` - Region name and listing page to start from
/// * `include_pagination` - Whether to follow the page's pagination
///
/// # Returns
///
/// * `Ok(Vec<RecordStub>)` - Stubs of every page that could be fetched
/// * `Err(PageError)` - The starting page could not be fetched or parsed
pub fn walk_region<'a>(
    ctx: &'a RunContext,
    region: &'a Region,
    include_pagination: bool,
) -> BoxFuture<'a, PageResult<Vec<RecordStub>>> {
    async move {
        tracing::debug!("Fetching listing page of {}: {}", region.name, region.root_url);
        let body = ctx.fetcher.fetch(&region.root_url).await?;
        let listing = parse_listing(&body, &region.root_url, include_pagination)?;

        let mut stubs = Vec::new();

        if include_pagination {
            let pages: Vec<Region> = plan_pagination(&listing.pagination, MAX_SUPPLEMENTARY_PAGES)
                .into_iter()
                .map(|url| Region::new(region.name.clone(), url))
                .collect();

            let results = join_all(pages.iter().map(|page| walk_region(ctx, page, false))).await;

            for (page, result) in pages.iter().zip(results) {
                match result {
                    Ok(page_stubs) => stubs.extend(page_stubs),
                    Err(e) => {
                        tracing::error!("Failed to load content for {}, error: {}", page.root_url, e);
                    }
                }
            }
        }

        stubs.extend(
            listing
                .entries
                .into_iter()
                .map(|entry| entry.into_stub(&region.name)),
        );

        tracing::debug!(
            "Completed listing page of {}: {} ({} stubs)",
            region.name,
            region.root_url,
            stubs.len()
        );
        Ok(stubs)
    }
    .boxed()
}
