//! Parameters for the cursor-paginated bulk article export.

use serde::{Deserialize, Serialize};

use crate::pagination::CursorParams;
use crate::query::{Query, ToQuery};
use crate::{Cursor, LawId};

/// Parameters for `GET /bulk/articles/`.
///
/// `cursor` is managed by [`crate::AutoPaginator`] when walking all pages;
/// set it manually only to resume a previous walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleQuery {
    pub cursor: Option<Cursor>,
    pub page_size: Option<u32>,
    pub law_id: Option<LawId>,
    pub domain: Option<String>,
    /// Only articles changed at or after this RFC 3339 instant.
    pub updated_since: Option<String>,
}

impl CursorParams for ArticleQuery {
    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }
}

impl ToQuery for ArticleQuery {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("cursor", self.cursor.as_ref())
            .push_opt("page_size", self.page_size)
            .push_opt("law_id", self.law_id.as_ref())
            .push_opt("domain", self.domain.as_deref())
            .push_opt("updated_since", self.updated_since.as_deref());
        query
    }
}
