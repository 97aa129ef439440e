//! Stratalis: a mayors directory crawler
//!
//! This crate walks the regional mayor listings of a directory site, follows
//! their pagination, and extracts each mayor's contact details into a CSV file.
//! The work happens in two concurrent stages: a crawl that gathers
//! [`RecordStub`]s and an extraction that turns each stub into an
//! [`ExtractedRecord`].

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod record;

use thiserror::Error;

/// Directory page listing every region of the site
pub const DIRECTORY_URL: &str = "https://www.mon-maire.fr/maires-regions";

/// Main error type for Stratalis operations
#[derive(Debug, Error)]
pub enum StratalisError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Network-level failures for a single request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Fetcher shut down before requesting {url}")]
    Closed { url: String },
}

/// Mandatory page structure that could not be found
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing {element} on {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("Empty document at {url}")]
    EmptyDocument { url: String },

    #[error("Invalid CSS selector: {selector}")]
    InvalidSelector { selector: &'static str },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Either failure that drops a single unit of work (a page or a stub)
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PageError {
    /// Short label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "FetchError",
            Self::Parse(_) => "ParseError",
        }
    }
}

impl From<PageError> for StratalisError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::Fetch(e) => Self::Fetch(e),
            PageError::Parse(e) => Self::Parse(e),
        }
    }
}

/// Result type alias for Stratalis operations
pub type Result<T> = std::result::Result<T, StratalisError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single page operations
pub type PageResult<T> = std::result::Result<T, PageError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, walk_region, Fetcher, HttpFetcher, Region, RunContext};
pub use extract::{extract, extract_one};
pub use record::{ExtractedRecord, RecordField, RecordStub};
