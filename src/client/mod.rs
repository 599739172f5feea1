//! HTTP client and service layer for the WDMMG API.
//!
//! This module provides the main entry point [`WdmmgClient`] for
//! interacting with the WDMMG API.
//!
//! # Example
//!
//! ```no_run
//! use wdmmg::{ApiKey, ClientConfig, WdmmgClient};
//!
//! # async fn example() -> wdmmg::Result<()> {
//! let config = ClientConfig::from_env().with_page_size(500);
//! let client = WdmmgClient::with_config(ApiKey::from_env()?, config)?;
//!
//! let accounts = client.accounts().list().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use http::WdmmgClient;
pub use paginated::{Continuation, Page, PaginatedStream, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
pub(crate) use http::ClientInner;
