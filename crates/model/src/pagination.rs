//! Paginated response envelopes and the cursor-driven [`AutoPaginator`].
//!
//! The API paginates two ways:
//!
//! | Style | Envelope | Request params |
//! |-------|----------|----------------|
//! | Offset | [`PaginatedResponse`] (`next`/`previous` links) | `page`, `page_size` |
//! | Cursor | [`CursorResponse`] (opaque `next_cursor`) | `cursor`, `page_size` |
//!
//! Offset pages are fetched one at a time by the caller. Cursor pages can be
//! walked end to end with an [`AutoPaginator`], which pulls one page per
//! request from a [`PageSource`].

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::query::{Query, ToQuery};
use crate::{ApiError, Cursor};

// ---------------------------------------------------------------------------
// Offset pagination
// ---------------------------------------------------------------------------

/// One page of an offset-paginated listing.
///
/// `next` is `None` exactly on the last page and `previous` exactly on the
/// first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages.
    pub count: u64,
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the previous page.
    pub previous: Option<String>,
    /// Items on this page, in server order.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// `page` / `page_size` request parameters. Unset fields defer to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// Requests page `page` with `page_size` items.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

impl ToQuery for PageRequest {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size);
        query
    }
}

// ---------------------------------------------------------------------------
// Cursor pagination
// ---------------------------------------------------------------------------

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorResponse<T> {
    /// Total number of items across all pages.
    pub count: u64,
    /// Token for the next page; `None` when no further pages exist.
    pub next_cursor: Option<Cursor>,
    /// Page size the server applied.
    #[serde(default)]
    pub page_size: u32,
    /// Items on this page, in server order.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> CursorResponse<T> {
    /// Returns `true` if no page follows this one.
    ///
    /// An empty page is treated as terminal whatever its cursor says.
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none() || self.results.is_empty()
    }
}

/// Request parameters that carry a continuation cursor.
pub trait CursorParams {
    /// Replaces the cursor, leaving every other parameter untouched.
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Fetches one cursor page for a parameter set.
///
/// Implemented by endpoint façades over HTTP and by in-memory fakes in tests.
#[async_trait]
pub trait PageSource<P: Sync, T>: Send + Sync {
    async fn fetch_page(&self, params: &P) -> Result<CursorResponse<T>, ApiError>;
}

// ---------------------------------------------------------------------------
// AutoPaginator
// ---------------------------------------------------------------------------

/// Lazily walks every page of a cursor-paginated endpoint, yielding one batch
/// of results per page.
///
/// Pages are fetched strictly in order and only on demand: page N+1 is
/// requested when the caller asks for the next batch, never ahead of time.
/// Iteration stops when a page comes back empty (nothing is yielded for it)
/// or after yielding a page without a `next_cursor`. A failed fetch is
/// yielded once and ends the iteration; a paginator cannot be restarted.
pub struct AutoPaginator<S, P, T> {
    source: S,
    params: P,
    pages_fetched: usize,
    exhausted: bool,
    _item: PhantomData<fn() -> T>,
}

impl<S, P, T> AutoPaginator<S, P, T>
where
    S: PageSource<P, T>,
    P: CursorParams + Sync,
{
    /// Starts a walk at `params` (which may already carry a cursor).
    pub fn new(source: S, params: P) -> Self {
        Self {
            source,
            params,
            pages_fetched: 0,
            exhausted: false,
            _item: PhantomData,
        }
    }

    /// Number of page requests issued so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns `true` once no further batches will be produced.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The parameters the next request would be sent with.
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Fetches the next page and returns its results.
    ///
    /// Returns `None` when the walk is over.
    pub async fn next_batch(&mut self) -> Option<Result<Vec<T>, ApiError>> {
        if self.exhausted {
            return None;
        }

        let page = match self.source.fetch_page(&self.params).await {
            Ok(page) => page,
            Err(err) => {
                self.exhausted = true;
                return Some(Err(err));
            }
        };
        self.pages_fetched += 1;

        if page.results.is_empty() {
            debug!(pages = self.pages_fetched, "empty page, pagination complete");
            self.exhausted = true;
            return None;
        }

        match page.next_cursor {
            Some(cursor) if !cursor.as_str().is_empty() => self.params.set_cursor(cursor),
            _ => {
                debug!(pages = self.pages_fetched, "no next cursor, pagination complete");
                self.exhausted = true;
            }
        }

        Some(Ok(page.results))
    }

    /// Drains every remaining page into one vector, stopping at the first error.
    pub async fn collect_all(mut self) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        while let Some(batch) = self.next_batch().await {
            items.extend(batch?);
        }
        Ok(items)
    }

    /// Converts the paginator into a [`Stream`] of batches.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<T>, ApiError>> {
        futures::stream::unfold(self, |mut paginator| async move {
            paginator
                .next_batch()
                .await
                .map(|batch| (batch, paginator))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use futures::StreamExt;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Params {
        cursor: Option<Cursor>,
        page_size: u32,
    }

    impl CursorParams for Params {
        fn set_cursor(&mut self, cursor: Cursor) {
            self.cursor = Some(cursor);
        }
    }

    /// Replays scripted pages and records the params of every call.
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<CursorResponse<&'static str>, ApiError>>>,
        calls: Mutex<Vec<Params>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<CursorResponse<&'static str>, ApiError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Params> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<'a> PageSource<Params, &'static str> for &'a ScriptedSource {
        async fn fetch_page(
            &self,
            params: &Params,
        ) -> Result<CursorResponse<&'static str>, ApiError> {
            self.calls.lock().unwrap().push(params.clone());
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("paginator fetched more pages than scripted")
        }
    }

    fn page(
        results: Vec<&'static str>,
        next_cursor: Option<&str>,
    ) -> Result<CursorResponse<&'static str>, ApiError> {
        Ok(CursorResponse {
            count: 3,
            next_cursor: next_cursor.and_then(Cursor::new),
            page_size: 2,
            results,
        })
    }

    #[tokio::test]
    async fn test_walks_pages_and_chains_cursor() {
        let source = ScriptedSource::new(vec![page(vec!["a", "b"], Some("c2")), page(vec!["c"], None)]);
        let params = Params {
            cursor: None,
            page_size: 2,
        };
        let mut paginator = AutoPaginator::new(&source, params);

        assert_eq!(paginator.next_batch().await.unwrap().unwrap(), vec!["a", "b"]);
        assert_eq!(paginator.next_batch().await.unwrap().unwrap(), vec!["c"]);
        assert!(paginator.next_batch().await.is_none());
        assert_eq!(paginator.pages_fetched(), 2);

        let calls = source.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].cursor, None);
        assert_eq!(calls[1].cursor.as_ref().map(Cursor::as_str), Some("c2"));
        assert_eq!(calls[1].page_size, 2, "non-cursor params are held constant");
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_nothing() {
        let source = ScriptedSource::new(vec![page(vec![], None)]);
        let mut paginator = AutoPaginator::new(&source, Params::default());

        assert!(paginator.next_batch().await.is_none());
        assert!(paginator.is_exhausted());
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_page_terminates_despite_cursor() {
        let source = ScriptedSource::new(vec![page(vec!["a"], Some("c2")), page(vec![], Some("c3"))]);
        let batches: Vec<_> = AutoPaginator::new(&source, Params::default())
            .into_stream()
            .collect()
            .await;

        assert_eq!(batches.len(), 1);
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_starting_cursor_is_sent_on_first_request() {
        let source = ScriptedSource::new(vec![page(vec!["x"], None)]);
        let params = Params {
            cursor: Cursor::new("resume-here"),
            page_size: 50,
        };
        let items = AutoPaginator::new(&source, params).collect_all().await.unwrap();

        assert_eq!(items, vec!["x"]);
        assert_eq!(
            source.calls()[0].cursor.as_ref().map(Cursor::as_str),
            Some("resume-here")
        );
    }

    #[tokio::test]
    async fn test_error_is_yielded_once_then_exhausted() {
        let source = ScriptedSource::new(vec![
            page(vec!["a"], Some("c2")),
            Err(ApiError::Transport {
                message: "connection reset".into(),
            }),
        ]);
        let mut paginator = AutoPaginator::new(&source, Params::default());

        assert!(paginator.next_batch().await.unwrap().is_ok());
        assert!(matches!(
            paginator.next_batch().await,
            Some(Err(ApiError::Transport { .. }))
        ));
        assert!(paginator.next_batch().await.is_none());
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_collect_all_propagates_error() {
        let source = ScriptedSource::new(vec![Err(ApiError::Timeout {
            after: std::time::Duration::from_secs(1),
        })]);
        let result = AutoPaginator::new(&source, Params::default()).collect_all().await;
        assert!(matches!(result, Err(ApiError::Timeout { .. })));
    }

    #[test]
    fn test_cursor_response_is_last() {
        let last: CursorResponse<u8> =
            serde_json::from_str(r#"{"count":1,"next_cursor":null,"page_size":10,"results":[1]}"#).unwrap();
        assert!(last.is_last());

        let more: CursorResponse<u8> =
            serde_json::from_str(r#"{"count":2,"next_cursor":"abc","page_size":1,"results":[1]}"#).unwrap();
        assert!(!more.is_last());
    }

    #[test]
    fn test_envelopes_decode_records_without_default() {
        let page: PaginatedResponse<crate::LawSummary> =
            serde_json::from_str(r#"{"count":0,"next":null,"previous":null}"#).unwrap();
        assert!(page.is_empty());

        let page: CursorResponse<crate::Article> = serde_json::from_str(
            r#"{"count":1,"next_cursor":null,"results":[{"id":"a1","text":"Objeto"}]}"#,
        )
        .unwrap();
        assert_eq!(page.results[0].id.as_str(), "a1");
        assert_eq!(page.page_size, 0);
    }

    #[test]
    fn test_page_request_query_omits_unset_fields() {
        assert_eq!(PageRequest::default().to_query().encode(), "");
        assert_eq!(PageRequest::new(2, 25).to_query().encode(), "page=2&page_size=25");
    }
}
