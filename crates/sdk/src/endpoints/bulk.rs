use std::sync::Arc;

use async_trait::async_trait;
use model::{ApiError, Article, ArticleQuery, AutoPaginator, CursorResponse, PageSource, ToQuery};

use crate::RequestEngine;

/// Paginator over every article matching an [`ArticleQuery`].
pub type ArticlePaginator = AutoPaginator<Bulk, ArticleQuery, Article>;

/// Cursor-paginated bulk article export.
#[derive(Debug, Clone)]
pub struct Bulk {
    engine: Arc<RequestEngine>,
}

impl Bulk {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// One page of articles (`GET /bulk/articles/`).
    pub async fn article_page(
        &self,
        params: &ArticleQuery,
    ) -> Result<CursorResponse<Article>, ApiError> {
        self.engine
            .get_json("/bulk/articles/", &params.to_query())
            .await
    }

    /// Lazily walks every page starting at `params`, one request per batch.
    pub fn articles(&self, params: ArticleQuery) -> ArticlePaginator {
        AutoPaginator::new(self.clone(), params)
    }
}

#[async_trait]
impl PageSource<ArticleQuery, Article> for Bulk {
    async fn fetch_page(&self, params: &ArticleQuery) -> Result<CursorResponse<Article>, ApiError> {
        self.article_page(params).await
    }
}
