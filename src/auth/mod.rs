//! Credentials for the WDMMG API.
//!
//! The API authenticates every request with a single API key. By default
//! it is sent as a bearer token:
//!
//! ```no_run
//! use wdmmg::{ApiKey, AuthScheme, ClientConfig, WdmmgClient};
//!
//! # fn example() -> wdmmg::Result<()> {
//! let client = WdmmgClient::new("your-api-key")?;
//!
//! // Some deployments expect the key in a dedicated header instead.
//! let config = ClientConfig::default()
//!     .with_auth_scheme(AuthScheme::Header("x-api-key".into()));
//! let client = WdmmgClient::with_config(ApiKey::from_env()?, config)?;
//! # Ok(())
//! # }
//! ```

mod api_key;

pub use api_key::{ApiKey, AuthScheme, API_KEY_ENV};
