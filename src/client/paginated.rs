//! Pagination over list endpoints.
//!
//! List endpoints return one page at a time together with a continuation
//! marker. The services' `list` methods follow the markers until the server
//! stops sending them and return everything at once; [`PaginatedStream`]
//! follows the same markers lazily, one page in memory at a time.
//!
//! A page is either a bare JSON array (complete, nothing follows) or an
//! envelope:
//!
//! ```json
//! { "transactions": [ ... ], "has_more": true, "next_cursor": null }
//! ```
//!
//! A non-empty `next_cursor` wins over `has_more`; otherwise `has_more`
//! advances the offset by the page size.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ClientInner;
use crate::{Error, Result};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default bound on pages fetched by one list operation.
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Where the next page starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Offset-based paging: skip this many records.
    Offset(u64),
    /// Cursor-based paging: opaque token from the previous page.
    Cursor(String),
}

impl Continuation {
    /// Position of the first page.
    pub fn start() -> Self {
        Continuation::Offset(0)
    }
}

/// One page of records plus the marker for the page after it.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records in server order.
    pub items: Vec<T>,
    /// Where the next page starts, `None` if this was the last page.
    pub next: Option<Continuation>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a page body.
    ///
    /// `records_key` names the array inside an envelope; a missing or null
    /// array is an empty page. `at` is the position this page was requested
    /// from, used to compute the next offset.
    pub fn from_value(value: Value, records_key: &str, at: &Continuation, page_size: u32) -> Result<Self> {
        let mut map = match value {
            Value::Array(items) => {
                return Ok(Self {
                    items: decode_items(Value::Array(items))?,
                    next: None,
                });
            }
            Value::Object(map) => map,
            other => {
                return Err(Error::Json(serde::de::Error::custom(format!(
                    "expected a page object or array, got {}",
                    json_kind(&other)
                ))));
            }
        };

        let items = match map.remove(records_key) {
            None | Some(Value::Null) => Vec::new(),
            Some(records) => decode_items(records)?,
        };

        let cursor = map
            .get("next_cursor")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(String::from);
        let has_more = map.get("has_more").and_then(Value::as_bool).unwrap_or(false);

        let next = match (cursor, at) {
            (Some(cursor), _) => Some(Continuation::Cursor(cursor)),
            (None, Continuation::Offset(offset)) if has_more => {
                Some(Continuation::Offset(offset + u64::from(page_size)))
            }
            (None, Continuation::Cursor(_)) if has_more => {
                // has_more without a cursor cannot be followed in cursor mode
                return Err(Error::Json(serde::de::Error::custom(
                    "page signals has_more but carries no next_cursor",
                )));
            }
            _ => None,
        };

        Ok(Self { items, next })
    }
}

fn decode_items<T: DeserializeOwned>(records: Value) -> Result<Vec<T>> {
    Ok(serde_json::from_value(records)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Query string for one page request.
#[derive(Serialize)]
struct PageQuery<'a, F> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
    #[serde(flatten)]
    filter: &'a F,
}

/// Fetches pages of one list endpoint with a fixed filter.
///
/// The filter is serialized into the query string of every page request,
/// so server-side filtering stays consistent across pages.
pub(crate) struct PageFetcher<F> {
    inner: Arc<ClientInner>,
    path: &'static str,
    records_key: &'static str,
    filter: F,
    page_size: u32,
}

impl<F> PageFetcher<F>
where
    F: Serialize,
{
    pub(crate) fn new(
        inner: Arc<ClientInner>,
        path: &'static str,
        records_key: &'static str,
        filter: F,
    ) -> Self {
        let page_size = inner.config.page_size;
        Self {
            inner,
            path,
            records_key,
            filter,
            page_size,
        }
    }

    /// Override the configured page size.
    pub(crate) fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn max_pages(&self) -> usize {
        self.inner.config.max_pages
    }

    /// Fetch the page starting at `at`.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, at: &Continuation) -> Result<Page<T>> {
        let query = match at {
            Continuation::Offset(offset) => PageQuery {
                offset: Some(*offset),
                limit: self.page_size,
                cursor: None,
                filter: &self.filter,
            },
            Continuation::Cursor(cursor) => PageQuery {
                offset: None,
                limit: self.page_size,
                cursor: Some(cursor.as_str()),
                filter: &self.filter,
            },
        };

        let body: Value = self.inner.get_with_query(self.path, &query).await?;
        let page = Page::from_value(body, self.records_key, at, self.page_size)?;

        tracing::debug!(
            path = self.path,
            at = ?at,
            count = page.items.len(),
            has_more = page.next.is_some(),
            "Fetched page"
        );

        Ok(page)
    }

    /// Follow continuation markers to the end and return every record.
    ///
    /// Any failing page aborts the whole operation; records gathered so far
    /// are dropped. If the page bound is reached while the server still
    /// signals more data, fails with [`Error::PaginationLimitExceeded`].
    pub(crate) async fn collect_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let max_pages = self.max_pages();
        let mut items = Vec::new();
        let mut next = Some(Continuation::start());
        let mut pages = 0usize;

        while let Some(at) = next {
            if pages == max_pages {
                tracing::warn!(
                    path = self.path,
                    max_pages,
                    "Pagination did not terminate, giving up"
                );
                return Err(Error::PaginationLimitExceeded { max_pages });
            }

            let page = self.fetch::<T>(&at).await?;
            pages += 1;
            items.extend(page.items);
            next = page.next;
        }

        tracing::info!(path = self.path, pages, total = items.len(), "Fetched all pages");
        Ok(items)
    }
}

impl<F> PageFetcher<F>
where
    F: Serialize + Send + Sync + 'static,
{
    /// Turn this fetcher into a lazy stream of records.
    pub(crate) fn into_stream<T>(self) -> PaginatedStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let max_pages = self.max_pages();
        let fetcher = Arc::new(self);
        PaginatedStream::new(max_pages, move |at: Continuation| {
            let fetcher = fetcher.clone();
            Box::pin(async move { fetcher.fetch::<T>(&at).await })
        })
    }
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FetchPage<T> = Box<dyn Fn(Continuation) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// A stream that lazily fetches pages from a list endpoint.
///
/// The stream yields individual records, fetching the next page when the
/// current one is exhausted. It ends after the last page, or right after
/// yielding the first error.
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
///     println!("{} {:?}", txn.date, txn.amount);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch a page from a position.
    fetch_page: FetchPage<T>,
    /// Records of the current page not yet yielded.
    current_items: VecDeque<T>,
    /// Position of the next page, `None` if exhausted.
    next: Option<Continuation>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Page<T>>>>,
    /// Pages fetched so far.
    pages_fetched: usize,
    /// Bound on pages fetched.
    max_pages: usize,
    /// Error to yield before anything else.
    deferred_error: Option<Error>,
}

impl<T> PaginatedStream<T> {
    /// Create a new paginated stream starting at the first page.
    pub fn new<F>(max_pages: usize, fetch_page: F) -> Self
    where
        F: Fn(Continuation) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: VecDeque::new(),
            next: Some(Continuation::start()),
            pending_fetch: None,
            pages_fetched: 0,
            max_pages,
            deferred_error: None,
        }
    }

    /// A stream that yields `error` once and then ends without fetching.
    pub(crate) fn failed(error: Error) -> Self
    where
        T: Send + 'static,
    {
        Self {
            fetch_page: Box::new(|_: Continuation| -> BoxFuture<'static, Result<Page<T>>> {
                Box::pin(async { Ok(Page { items: Vec::new(), next: None }) })
            }),
            current_items: VecDeque::new(),
            next: None,
            pending_fetch: None,
            pages_fetched: 0,
            max_pages: 0,
            deferred_error: Some(error),
        }
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        if let Some(err) = this.deferred_error.take() {
            return Poll::Ready(Some(Err(err)));
        }

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.pages_fetched += 1;
                        this.current_items = page.items.into();
                        this.next = page.next;
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }

            if let Some(at) = this.next.take() {
                if this.pages_fetched >= this.max_pages {
                    return Poll::Ready(Some(Err(Error::PaginationLimitExceeded {
                        max_pages: this.max_pages,
                    })));
                }
                this.pending_fetch = Some((this.fetch_page)(at));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
