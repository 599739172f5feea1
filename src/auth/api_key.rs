//! API key credential and how it is attached to requests.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Environment variable read by [`ApiKey::from_env`].
pub const API_KEY_ENV: &str = "WDMMG_API_KEY";

/// An API key for the WDMMG API.
///
/// The key is held as a secret and is never printed by `Debug`.
///
/// # Example
///
/// ```
/// use wdmmg::ApiKey;
///
/// let key = ApiKey::new("sk_live_123").expect("non-empty key");
/// assert_eq!(format!("{:?}", key), "ApiKey([REDACTED])");
/// ```
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wrap a key, rejecting empty or whitespace-only values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the key is empty or cannot be sent in
    /// an HTTP header.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::Config(format!(
                "API key is required. Pass a key or set the {} environment variable",
                API_KEY_ENV
            )));
        }
        if HeaderValue::from_str(&key).is_err() {
            return Err(Error::Config(
                "API key contains characters not allowed in an HTTP header".to_string(),
            ));
        }
        Ok(Self(SecretString::from(key)))
    }

    /// Read the key from the `WDMMG_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var(API_KEY_ENV).unwrap_or_default())
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// How the API key travels with each request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// The raw key in a named header, e.g. `x-api-key`.
    Header(String),
    /// The raw key as a named query parameter.
    QueryParam(String),
}

impl AuthScheme {
    /// Add the credential to a header map.
    ///
    /// Returns the query pair to append when the scheme is
    /// [`AuthScheme::QueryParam`].
    pub(crate) fn apply<'a>(
        &'a self,
        key: &'a ApiKey,
        headers: &mut HeaderMap,
    ) -> Result<Option<(&'a str, &'a str)>> {
        match self {
            AuthScheme::Bearer => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", key.expose()))
                    .map_err(|_| Error::Config("API key is not a valid header value".to_string()))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
                Ok(None)
            }
            AuthScheme::Header(name) => {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| Error::Config(format!("Invalid auth header name: {}", name)))?;
                let mut value = HeaderValue::from_str(key.expose())
                    .map_err(|_| Error::Config("API key is not a valid header value".to_string()))?;
                value.set_sensitive(true);
                headers.insert(name, value);
                Ok(None)
            }
            AuthScheme::QueryParam(name) => Ok(Some((name.as_str(), key.expose()))),
        }
    }
}
