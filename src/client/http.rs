//! HTTP client implementation for the WDMMG API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::api::{AccountsService, TransactionsService};
use crate::auth::ApiKey;
use crate::error::error_message;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the WDMMG API.
///
/// The client holds the API key and configuration and hands out service
/// structs for each endpoint group. It keeps no other state, so cloning it
/// is cheap and clones can be used from many tasks at once.
///
/// # Example
///
/// ```no_run
/// use wdmmg::WdmmgClient;
/// use wdmmg::api::TransactionsQuery;
///
/// # async fn example() -> wdmmg::Result<()> {
/// let client = WdmmgClient::new("your-api-key")?;
///
/// let accounts = client.accounts().list().await?;
/// println!("{} accounts", accounts.len());
///
/// let transactions = client
///     .transactions()
///     .list(TransactionsQuery::new().start_date("2024-01-01"))
///     .await?;
/// println!("{} transactions", transactions.len());
/// # Ok(())
/// # }
/// ```
pub struct WdmmgClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: ApiKey,
    pub(crate) config: ClientConfig,
}

impl WdmmgClient {
    /// Create a client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ApiKey::new(api_key)?, ClientConfig::default())
    }

    /// Create a client from `WDMMG_API_KEY` and, if set, `WDMMG_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ApiKey::from_env()?, ClientConfig::from_env())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(api_key: ApiKey, config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            base_url = %config.base_url,
            timeout = ?config.timeout,
            page_size = config.page_size,
            max_pages = config.max_pages,
            "Initialized WDMMG client"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                api_key,
                config,
            }),
        })
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the transactions service.
    pub fn transactions(&self) -> TransactionsService {
        TransactionsService::new(self.inner.clone())
    }

    /// Get the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Join an endpoint path onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let auth_query = self
            .config
            .auth_scheme
            .apply(&self.api_key, &mut headers)?;

        let mut request = self.http.get(&url).headers(headers).query(query);
        if let Some(pair) = auth_query {
            request = request.query(&[pair]);
        }

        tracing::debug!(method = "GET", url = %url, "Request");

        let response = request.send().await.map_err(Error::from_transport)?;

        self.handle_response(response).await
    }

    /// Handle an API response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let status_code = status.as_u16();

        if status.is_success() {
            let bytes = response.bytes().await.map_err(Error::from_transport)?;
            tracing::debug!(status = status_code, bytes = bytes.len(), "Response");
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(
                    status = status_code,
                    error = %e.without_url(),
                    "Failed to read error body"
                );
                String::new()
            }
        };
        let body: serde_json::Value = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::Value::String(text.clone()));

        match status_code {
            401 | 403 => {
                let message = error_message(&body).unwrap_or_else(|| {
                    if status_code == 401 {
                        "Invalid API key".to_string()
                    } else {
                        "Access forbidden".to_string()
                    }
                });
                tracing::warn!(status = status_code, "Authentication failed: {}", message);
                Err(Error::Authentication {
                    status: status_code,
                    message,
                })
            }
            429 => {
                tracing::warn!(retry_after = ?retry_after, "Rate limit exceeded");
                Err(Error::RateLimited {
                    retry_after_secs: retry_after,
                })
            }
            _ => {
                let preview: String = text.chars().take(500).collect();
                tracing::error!(status = status_code, body = %preview, "API error");
                Err(Error::from_api_response(status_code, body))
            }
        }
    }
}

impl Clone for WdmmgClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for WdmmgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WdmmgClient")
            .field("config", &self.inner.config)
            .field("api_key", &self.inner.api_key)
            .finish()
    }
}
