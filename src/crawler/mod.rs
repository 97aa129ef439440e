//! Crawl stage: from the region directory to a flat list of record stubs
//!
//! This module contains:
//! - HTTP fetching behind the [`Fetcher`] seam, with a shared connection ceiling
//! - HTML parsing of directory and listing pages
//! - Pagination planning for region listings
//! - The recursive region walker and the crawl orchestrator

mod context;
mod coordinator;
mod fetcher;
mod pagination;
mod parser;
mod walker;

pub use context::RunContext;
pub use coordinator::{crawl, walk_regions};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
#[cfg(test)]
pub(crate) use fetcher::StaticFetcher;
pub use pagination::{plan_pagination, substitute_page_number, MAX_SUPPLEMENTARY_PAGES};
pub use parser::{parse_directory, parse_listing, ListingEntry, ListingPage, PageLink, Region};
pub use walker::walk_region;

pub(crate) use parser::selector;
