//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client (user agent, session timeout, no keep-alive)
//! - Capping the number of requests in flight across every concurrent task
//! - Classifying failures into [`FetchError`] variants
//!
//! The [`Fetcher`] trait is the seam the crawl and extract stages depend on.

use crate::config::HttpConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION};
use reqwest::Client;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;
use tokio::sync::Semaphore;
use url::Url;

/// Source of page text for a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body as text
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// Idle connections are never pooled and every request asks the server to
/// close the connection, so each fetch opens a fresh socket.
///
/// # Arguments
///
/// * `config` - The HTTP session configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("close"));

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.timeout())
        .pool_max_idle_per_host(0)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher: one reqwest client behind a connection ceiling
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    permits: Semaphore,
}

impl HttpFetcher {
    /// Creates a fetcher from the HTTP session configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.max_connections,
        ))
    }

    /// Wraps an existing client, allowing at most `max_connections` requests in flight
    pub fn with_client(client: Client, max_connections: usize) -> Self {
        Self {
            client,
            permits: Semaphore::new(max_connections.max(1)),
        }
    }

    /// Number of requests that could start right now without waiting
    pub fn available_connections(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let _permit = self.permits.acquire().await.map_err(|_| FetchError::Closed {
            url: url.to_string(),
        })?;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })
    }
}

/// Maps a transport error to the matching [`FetchError`]
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// In-memory fetcher serving fixed pages
///
/// URLs that were never registered answer with a 404 status.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Result<String, u16>>,
    requested: Mutex<Vec<String>>,
}

#[cfg(test)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `url`
    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(key(url), Ok(body.into()));
        self
    }

    /// Answers `url` with a non-success status
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(key(url), Err(status));
        self
    }

    /// URLs requested so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
fn key(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[cfg(test)]
#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        if let Ok(mut seen) = self.requested.lock() {
            seen.push(url.to_string());
        }

        match self.pages.get(url.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
