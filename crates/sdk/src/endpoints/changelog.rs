use std::sync::Arc;

use model::{
    ApiError, ChangelogEntry, ChangelogFilters, CorpusStats, PageRequest, PaginatedResponse, Query,
    ToQuery,
};

use crate::RequestEngine;

/// Recent changes to the corpus.
#[derive(Debug, Clone)]
pub struct Changelog {
    engine: Arc<RequestEngine>,
}

impl Changelog {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// One page of changes, newest first (`GET /changelog/`).
    pub async fn list(
        &self,
        filters: &ChangelogFilters,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<ChangelogEntry>, ApiError> {
        let mut query = filters.to_query();
        query.extend(page.to_query());
        self.engine.get_json("/changelog/", &query).await
    }
}

/// Corpus-wide statistics.
#[derive(Debug, Clone)]
pub struct Stats {
    engine: Arc<RequestEngine>,
}

impl Stats {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// `GET /stats/`. Uncached; see [`crate::StatsCache`] for dashboards.
    pub async fn get(&self) -> Result<CorpusStats, ApiError> {
        self.engine.get_json("/stats/", &Query::new()).await
    }
}
