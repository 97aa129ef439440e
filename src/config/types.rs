use serde::Deserialize;
use std::time::Duration;

/// Default ceiling on concurrently open connections
pub const DEFAULT_MAX_CONNECTIONS: usize = 50;

/// Default timeout applied to every request of a session (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 50;

/// Main configuration structure for Stratalis
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
}

/// HTTP session configuration, shared by the crawl and extract stages
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Maximum number of requests in flight at once
    #[serde(rename = "max-connections", default = "default_max_connections")]
    pub max_connections: usize,

    /// Timeout for a whole request, connect to last body byte
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_max_connections() -> usize {
    DEFAULT_MAX_CONNECTIONS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("stratalis/{}", env!("CARGO_PKG_VERSION"))
}
