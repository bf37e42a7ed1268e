use std::sync::Arc;

use model::{
    ApiError, Article, LawDetail, LawFilters, LawId, LawSummary, PageRequest, PaginatedResponse,
    Query, ToQuery,
};

use crate::RequestEngine;

/// Law listing and retrieval.
#[derive(Debug, Clone)]
pub struct Laws {
    engine: Arc<RequestEngine>,
}

impl Laws {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// One page of laws matching `filters` (`GET /laws/`).
    pub async fn list(
        &self,
        filters: &LawFilters,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<LawSummary>, ApiError> {
        let mut query = filters.to_query();
        query.extend(page.to_query());
        self.engine.get_json("/laws/", &query).await
    }

    /// A single law with its articles and versions (`GET /laws/{id}/`).
    pub async fn get(&self, id: &LawId) -> Result<LawDetail, ApiError> {
        let path = format!("/laws/{}/", id.to_path_segment());
        self.engine.get_json(&path, &Query::new()).await
    }

    /// One page of a law's articles (`GET /laws/{id}/articles/`).
    pub async fn articles(
        &self,
        id: &LawId,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Article>, ApiError> {
        let path = format!("/laws/{}/articles/", id.to_path_segment());
        self.engine.get_json(&path, &page.to_query()).await
    }
}
