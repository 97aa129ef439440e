//! Pagination planning for region listings
//!
//! A region's root listing page shows numbered anchors (`1 2 3 … 12 Suivant`).
//! Only the anchor for page 2 is trusted as a URL template; the other pages
//! are derived from it by swapping the page number, up to the largest number
//! shown. The plan is then cut to `cap` entries, so a region never costs more
//! than `1 + cap` listing fetches.

use crate::crawler::parser::PageLink;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Supplementary listing pages walked per region, however many exist
pub const MAX_SUPPLEMENTARY_PAGES: usize = 2;

/// Page whose anchor serves as the URL template
const TEMPLATE_PAGE: u32 = 2;

/// Builds the ordered list of supplementary page URLs
///
/// # Arguments
///
/// * `links` - Pagination anchors of the root listing page, in page order
/// * `cap` - Maximum number of URLs to return
///
/// # Returns
///
/// URLs for pages `2..=last`, truncated to `cap` entries. Empty when there is
/// no pagination or no anchor labelled `2`.
pub fn plan_pagination(links: &[PageLink], cap: usize) -> Vec<Url> {
    if links.is_empty() {
        return Vec::new();
    }

    let mut last_page = TEMPLATE_PAGE;
    let mut template = None;

    for link in links {
        // Non-numeric labels ("Suivant", "Précédent") are ignored
        let Ok(number) = link.label.trim().parse::<u32>() else {
            continue;
        };
        if number == TEMPLATE_PAGE {
            template = Some(&link.href);
        }
        last_page = last_page.max(number);
    }

    let Some(template) = template else {
        tracing::debug!("Pagination without a page {} anchor", TEMPLATE_PAGE);
        return Vec::new();
    };

    (TEMPLATE_PAGE..=last_page)
        .take(cap)
        .filter_map(|page| substitute_page_number(template, page))
        .collect()
}

/// Rewrites the page-2 template URL for `page`
///
/// The page token is looked up in this order:
/// 1. the last path segment that is exactly `2` (`/page/2`)
/// 2. the last query value that is exactly `2` (`?page=2`)
/// 3. the last standalone `2` digit run in the path, then in the query
///
/// Digits in the host or port are never touched.
pub fn substitute_page_number(template: &Url, page: u32) -> Option<Url> {
    let mut url = template.clone();

    if let Some(path) = replace_path_segment(template.path(), page) {
        url.set_path(&path);
        return Some(url);
    }

    if let Some(query) = template.query().and_then(|q| replace_query_value(q, page)) {
        url.set_query(Some(&query));
        return Some(url);
    }

    if let Some(path) = replace_last_token(template.path(), page) {
        url.set_path(&path);
        return Some(url);
    }

    if let Some(query) = template.query().and_then(|q| replace_last_token(q, page)) {
        url.set_query(Some(&query));
        return Some(url);
    }

    None
}

fn replace_path_segment(path: &str, page: u32) -> Option<String> {
    let page = page.to_string();
    let mut segments: Vec<&str> = path.split('/').collect();
    let index = segments.iter().rposition(|segment| *segment == "2")?;
    segments[index] = &page;
    Some(segments.join("/"))
}

fn replace_query_value(query: &str, page: u32) -> Option<String> {
    let mut pairs: Vec<String> = query.split('&').map(str::to_string).collect();
    let index = pairs
        .iter()
        .rposition(|pair| matches!(pair.split_once('='), Some((_, "2"))))?;
    let replaced = match pairs[index].split_once('=') {
        Some((key, _)) => format!("{key}={page}"),
        None => return None,
    };
    pairs[index] = replaced;
    Some(pairs.join("&"))
}

fn replace_last_token(text: &str, page: u32) -> Option<String> {
    let token = digit_runs()
        .find_iter(text)
        .filter(|m| m.as_str() == "2")
        .last()?;

    let mut replaced = String::with_capacity(text.len() + 2);
    replaced.push_str(&text[..token.start()]);
    replaced.push_str(&page.to_string());
    replaced.push_str(&text[token.end()..]);
    Some(replaced)
}

fn digit_runs() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("valid digit regex"))
}
