//! Field extraction from a mayor's detail page
//!
//! Every field is best effort: a marker that is missing from the page yields
//! an empty string. Only an empty document is an error.

use crate::crawler::selector;
use crate::ParseError;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Sentence that introduces the date a mayor took office
pub const TOOK_OFFICE_TRIGGER: &str = "a pris ses fonctions en tant que maire le";

/// Fields read from a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub took_office: String,
}

/// Parses the fields of a detail page
///
/// # Arguments
///
/// * `html` - The HTML content of the detail page
/// * `page_url` - The page URL, used in error reports
///
/// # Returns
///
/// * `Ok(DetailFields)` - Fields found on the page, empty where absent
/// * `Err(ParseError)` - The document is empty
pub fn parse_detail(html: &str, page_url: &Url) -> Result<DetailFields, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument {
            url: page_url.to_string(),
        });
    }

    let document = Html::parse_document(html);

    let locality = join_parts(
        &[
            itemprop(&document, "postalCode"),
            itemprop(&document, "addressLocality"),
        ],
        " ",
    );
    let address = join_parts(
        &[
            itemprop(&document, "name"),
            itemprop(&document, "streetAddress"),
            locality,
        ],
        ", ",
    );

    Ok(DetailFields {
        phone: itemprop(&document, "telephone"),
        email: itemprop(&document, "email"),
        address,
        took_office: took_office(&document)?,
    })
}

/// Trimmed text of the first element carrying `itemprop="{name}"`
pub fn itemprop(document: &Html, name: &str) -> String {
    let Ok(selector) = Selector::parse(&format!(r#"[itemprop="{name}"]"#)) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Date the mayor took office, as `dd/mm/yyyy`
///
/// Only the first paragraph mentioning the trigger sentence is considered.
fn took_office(document: &Html) -> Result<String, ParseError> {
    let paragraph_selector = selector("p")?;

    let date = document
        .select(&paragraph_selector)
        .map(|paragraph| paragraph.text().collect::<String>())
        .find(|text| text.contains(TOOK_OFFICE_TRIGGER))
        .and_then(|text| {
            took_office_pattern()
                .captures(&text)
                .and_then(|captures| captures.get(1))
                .map(|date| date.as_str().to_string())
        })
        .unwrap_or_default();

    Ok(date)
}

fn took_office_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r"{}\s+(\d{{2}}/\d{{2}}/\d{{4}})",
            regex::escape(TOOK_OFFICE_TRIGGER)
        ))
        .expect("valid took office regex")
    })
}

/// Joins the non-empty parts with `separator`
fn join_parts(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
