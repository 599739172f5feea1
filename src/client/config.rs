//! Client configuration options.

use std::time::Duration;

use url::Url;

use super::paginated::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use crate::auth::AuthScheme;
use crate::{Error, Result};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://wdmmg.io/api/v1";

/// Environment variable that overrides the base URL in [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "WDMMG_BASE_URL";

/// Configuration for the WDMMG client.
///
/// # Example
///
/// ```
/// use wdmmg::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://staging.wdmmg.io/api/v1")
///     .with_timeout(Duration::from_secs(60))
///     .with_page_size(250);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Records requested per page
    pub page_size: u32,
    /// Upper bound on pages fetched by a single list operation
    pub max_pages: usize,
    /// How the API key is attached to requests
    pub auth_scheme: AuthScheme,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("wdmmg-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            auth_scheme: AuthScheme::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the base URL taken from `WDMMG_BASE_URL`
    /// when it is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }

    /// Point the client at another endpoint (staging, a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the number of records requested per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page bound for a single list operation.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set how the API key is sent.
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Check the configuration before a client is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a non-http(s) base URL, a zero page
    /// size, or a zero page bound, and [`Error::UrlParse`] for a base URL
    /// that does not parse.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Base URL must use http or https: {}",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.max_pages == 0 {
            return Err(Error::Config("max_pages must be at least 1".to_string()));
        }
        Ok(())
    }
}
