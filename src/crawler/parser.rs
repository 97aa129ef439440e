//! HTML parser for directory and listing pages
//!
//! This module handles parsing HTML content to extract:
//! - Regions from the directory page
//! - Mayor entries from a region's listing page
//! - Pagination anchors from a region's root listing page
//!
//! Directory and listing pages share the same markup: every item is an
//! `li.list-group-item` holding one link.

use crate::record::RecordStub;
use crate::ParseError;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Separator between a town and the rest of a listing entry's text
const LOCATION_SEPARATOR: char = '-';

/// A region discovered on the directory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub root_url: Url,
}

impl Region {
    pub fn new(name: impl Into<String>, root_url: Url) -> Self {
        Self {
            name: name.into(),
            root_url,
        }
    }
}

/// One mayor entry on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Town, taken from the text before the separator
    pub location: String,

    /// Link text (the mayor's name)
    pub label: String,

    /// Absolute link to the mayor's page
    pub link: Url,
}

impl ListingEntry {
    /// Turns the entry into a stub belonging to `region`
    pub fn into_stub(self, region: &str) -> RecordStub {
        RecordStub::new(region, self.location, self.label, self.link)
    }
}

/// A pagination anchor: its visible label and target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub href: Url,
}

/// Extracted information from a listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub entries: Vec<ListingEntry>,

    /// Empty unless pagination was requested
    pub pagination: Vec<PageLink>,
}

/// Parses the directory page into its regions
///
/// # Arguments
///
/// * `html` - The HTML content of the directory page
/// * `page_url` - The page URL, for resolving relative links
///
/// # Returns
///
/// * `Ok(Vec<Region>)` - Regions in page order
/// * `Err(ParseError)` - The page lists no region at all
pub fn parse_directory(html: &str, page_url: &Url) -> Result<Vec<Region>, ParseError> {
    let document = Html::parse_document(html);
    let item_selector = selector("li.list-group-item")?;
    let link_selector = selector("a[href]")?;

    let regions: Vec<Region> = document
        .select(&item_selector)
        .filter_map(|item| {
            let anchor = item.select(&link_selector).next()?;
            let name = element_text(&anchor);
            if name.is_empty() {
                return None;
            }
            let root_url = resolve_link(anchor.value().attr("href")?, page_url)?;
            Some(Region::new(name, root_url))
        })
        .collect();

    if regions.is_empty() {
        return Err(ParseError::MissingElement {
            url: page_url.to_string(),
            element: "region list",
        });
    }

    Ok(regions)
}

/// Parses a region's listing page
///
/// # Arguments
///
/// * `html` - The HTML content of the listing page
/// * `page_url` - The page URL, for resolving relative links
/// * `include_pagination` - Whether to collect pagination anchors
///
/// # Returns
///
/// * `Ok(ListingPage)` - Entries in page order, plus pagination anchors
/// * `Err(ParseError)` - The page has no listing items at all
pub fn parse_listing(
    html: &str,
    page_url: &Url,
    include_pagination: bool,
) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);
    let item_selector = selector("li.list-group-item")?;

    let mut items = document.select(&item_selector).peekable();
    if items.peek().is_none() {
        return Err(ParseError::MissingElement {
            url: page_url.to_string(),
            element: "listing entries",
        });
    }

    let entries = items
        .filter_map(|item| {
            let entry = parse_entry(item, page_url);
            if entry.is_none() {
                tracing::debug!("Skipping malformed listing entry on {}", page_url);
            }
            entry
        })
        .collect();

    let pagination = if include_pagination {
        extract_page_links(&document, page_url)
    } else {
        Vec::new()
    };

    Ok(ListingPage {
        entries,
        pagination,
    })
}

/// Reads `Town - ... <a href="...">Name</a>` from one listing item
///
/// The location is the text that precedes the link.
fn parse_entry(item: ElementRef<'_>, page_url: &Url) -> Option<ListingEntry> {
    let mut leading_text = String::new();
    let mut anchor = None;

    for child in item.children() {
        match child.value() {
            Node::Text(text) => leading_text.push_str(text),
            Node::Element(element) if element.name() == "a" => {
                anchor = ElementRef::wrap(child);
                break;
            }
            _ => {}
        }
    }

    let anchor = anchor?;
    let location = leading_text
        .split(LOCATION_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    if location.is_empty() {
        return None;
    }

    let link = resolve_link(anchor.value().attr("href")?, page_url)?;

    Some(ListingEntry {
        location,
        label: element_text(&anchor),
        link,
    })
}

/// Collects every `a.page-numbers` anchor in page order
fn extract_page_links(document: &Html, page_url: &Url) -> Vec<PageLink> {
    let Ok(page_selector) = selector("a.page-numbers[href]") else {
        return Vec::new();
    };

    document
        .select(&page_selector)
        .filter_map(|anchor| {
            let href = resolve_link(anchor.value().attr("href")?, page_url)?;
            Some(PageLink {
                label: element_text(&anchor),
                href,
            })
        })
        .collect()
}

/// Resolves a link href to an absolute HTTP(S) URL
///
/// Returns None for empty hrefs, fragments, and non-HTTP schemes.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub(crate) fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector { selector: css })
}
