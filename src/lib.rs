//! # wdmmg
//!
//! An async Rust client for the WDMMG accounts and transactions API.
//!
//! ## Features
//!
//! - **API key authentication**: bearer token by default, or a custom
//!   header / query parameter
//! - **Automatic pagination**: list calls follow offset or cursor
//!   continuation markers and return every record, in server order
//! - **Lazy streaming**: page-at-a-time [`PaginatedStream`] for large
//!   histories
//! - **Date filtering**: inclusive ranges from [`chrono::NaiveDate`] or
//!   `YYYY-MM-DD` strings, validated before any request is sent
//! - **Typed errors**: configuration, validation, authentication, transient,
//!   and API failures are distinct [`Error`] variants
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wdmmg::WdmmgClient;
//! use wdmmg::api::TransactionsQuery;
//!
//! #[tokio::main]
//! async fn main() -> wdmmg::Result<()> {
//!     let client = WdmmgClient::new("your-api-key")?;
//!
//!     let accounts = client.accounts().list().await?;
//!     println!("Found {} accounts", accounts.len());
//!
//!     let transactions = client
//!         .transactions()
//!         .list(TransactionsQuery::between("2024-01-01", "2024-12-31"))
//!         .await?;
//!     println!("Found {} transactions", transactions.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use wdmmg::{Error, WdmmgClient};
//!
//! # async fn example() {
//! let client = WdmmgClient::new("invalid").unwrap();
//! match client.accounts().list().await {
//!     Ok(accounts) => println!("{} accounts", accounts.len()),
//!     Err(Error::Authentication { .. }) => println!("Bad API key!"),
//!     Err(e) if e.is_retryable() => println!("Temporary failure, try again: {}", e),
//!     Err(e) => println!("API error: {}", e),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{Account, AccountId, DateRange, Transaction, TransactionId};
pub use client::{ClientConfig, PaginatedStream, WdmmgClient};
pub use auth::{ApiKey, AuthScheme};

/// Prelude module for convenient imports.
///
/// ```rust
/// use wdmmg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Account, AccountId, DateInput, DateRange, Transaction, TransactionId,
    };
    pub use crate::api::{AccountsService, TransactionsQuery, TransactionsService};
    pub use crate::client::{ClientConfig, PaginatedStream, WdmmgClient};
    pub use crate::auth::{ApiKey, AuthScheme};
}
