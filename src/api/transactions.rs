//! Transactions service.

use std::sync::Arc;

use crate::client::paginated::{PageFetcher, PaginatedStream};
use crate::client::ClientInner;
use crate::models::{DateInput, DateRange, Transaction};
use crate::{Error, Result};

/// Service for transaction history.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use wdmmg::api::TransactionsQuery;
///
/// # async fn example(client: wdmmg::WdmmgClient) -> wdmmg::Result<()> {
/// let query = TransactionsQuery::new()
///     .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .end_date("2024-12-31");
///
/// let transactions = client.transactions().list(query).await?;
/// for txn in transactions {
///     println!("{} {:?} {:?}", txn.date, txn.amount, txn.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TransactionsService {
    inner: Arc<ClientInner>,
}

/// Filters for listing transactions.
///
/// Dates are inclusive and may be given as [`chrono::NaiveDate`] or as
/// `YYYY-MM-DD` strings. They are checked when the query is run, before
/// any request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionsQuery {
    /// First day included
    pub start_date: Option<DateInput>,
    /// Last day included
    pub end_date: Option<DateInput>,
    /// Records per page, overriding the client's page size
    pub page_size: Option<u32>,
}

impl TransactionsQuery {
    /// A query with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A query bounded on both ends.
    pub fn between(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Self {
        Self::new().start_date(start).end_date(end)
    }

    /// Set the first day included.
    pub fn start_date(mut self, date: impl Into<DateInput>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the last day included.
    pub fn end_date(mut self, date: impl Into<DateInput>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Set the number of records requested per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Check the filters and resolve the date range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unparseable date, a start after
    /// the end, or a zero page size.
    pub fn date_range(&self) -> Result<DateRange> {
        if self.page_size == Some(0) {
            return Err(Error::Validation("page_size must be at least 1".to_string()));
        }
        DateRange::new(self.start_date.clone(), self.end_date.clone())
    }
}

impl TransactionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn fetcher(&self, query: &TransactionsQuery) -> Result<PageFetcher<DateRange>> {
        let range = query.date_range()?;
        let fetcher = PageFetcher::new(self.inner.clone(), "/transactions", "transactions", range);
        Ok(match query.page_size {
            Some(page_size) => fetcher.page_size(page_size),
            None => fetcher,
        })
    }

    /// List all transactions matching the query.
    ///
    /// The date range is sent with every page request, so the server
    /// applies the same filter across pages. Returns the records in server
    /// order once the last page has arrived; fails as a whole if any page
    /// fails.
    pub async fn list(&self, query: TransactionsQuery) -> Result<Vec<Transaction>> {
        let fetcher = self.fetcher(&query)?;

        tracing::info!(
            start_date = ?query.start_date,
            end_date = ?query.end_date,
            "Fetching transactions"
        );

        let transactions: Vec<Transaction> = fetcher.collect_all().await?;
        tracing::info!(count = transactions.len(), "Fetched transactions");
        Ok(transactions)
    }

    /// Stream transactions matching the query, one page in memory at a time.
    ///
    /// An invalid query is reported as the first item of the stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use futures_util::StreamExt;
    /// use wdmmg::api::TransactionsQuery;
    ///
    /// # async fn example(client: wdmmg::WdmmgClient) -> wdmmg::Result<()> {
    /// let mut stream = client
    ///     .transactions()
    ///     .list_stream(TransactionsQuery::new().start_date("2024-01-01"));
    ///
    /// while let Some(result) = stream.next().await {
    ///     let txn = result?;
    ///     if txn.magnitude() > rust_decimal::Decimal::from(1000) {
    ///         println!("Large transaction: {:?}", txn.description);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_stream(&self, query: TransactionsQuery) -> PaginatedStream<Transaction> {
        match self.fetcher(&query) {
            Ok(fetcher) => fetcher.into_stream(),
            Err(err) => PaginatedStream::failed(err),
        }
    }
}
