//! Accounts service.

use std::sync::Arc;

use serde::Serialize;

use crate::client::paginated::{PageFetcher, PaginatedStream};
use crate::client::ClientInner;
use crate::models::Account;
use crate::Result;

/// Service for account operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: wdmmg::WdmmgClient) -> wdmmg::Result<()> {
/// let accounts = client.accounts().list().await?;
/// for account in accounts {
///     println!("{}: {:?}", account.id, account.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

/// The accounts endpoint takes no filters.
#[derive(Debug, Clone, Copy, Serialize)]
struct NoFilter {}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn fetcher(&self) -> PageFetcher<NoFilter> {
        PageFetcher::new(self.inner.clone(), "/accounts", "accounts", NoFilter {})
    }

    /// List all accounts visible to the API key.
    ///
    /// Follows pagination to the end and returns the records in server
    /// order. Fails as a whole if any page fails.
    pub async fn list(&self) -> Result<Vec<Account>> {
        tracing::info!("Fetching accounts");
        let accounts: Vec<Account> = self.fetcher().collect_all().await?;
        tracing::info!(count = accounts.len(), "Fetched accounts");
        Ok(accounts)
    }

    /// Stream all accounts, fetching one page at a time.
    pub fn list_stream(&self) -> PaginatedStream<Account> {
        self.fetcher().into_stream()
    }
}
