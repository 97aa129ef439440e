//! Run context shared by every stage of a run

use crate::config::Config;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use std::sync::Arc;

/// Everything a stage needs besides its own input
///
/// Cloning is cheap: clones share the same fetcher, and with it the same
/// connection ceiling.
#[derive(Clone)]
pub struct RunContext {
    /// Shared page source
    pub fetcher: Arc<dyn Fetcher>,
}

impl RunContext {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Builds the production context: an [`HttpFetcher`] configured from `config`
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::new(Arc::new(fetcher)))
    }
}
