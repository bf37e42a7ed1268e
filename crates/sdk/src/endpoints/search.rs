use std::sync::Arc;

use model::{search_query, ApiError, SearchFilters, SearchResponse};

use crate::RequestEngine;

/// Full-text search over the corpus.
#[derive(Debug, Clone)]
pub struct Search {
    engine: Arc<RequestEngine>,
}

impl Search {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// Searches for `query` (`GET /search/?q=...`).
    ///
    /// `query` is always sent, even when empty; filters are sent only when set.
    pub async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<SearchResponse, ApiError> {
        self.engine
            .get_json("/search/", &search_query(query, filters))
            .await
    }
}
