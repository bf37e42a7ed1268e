//! Full-text search records and filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::laws::LawSummary;
use crate::query::{Query, ToQuery};
use crate::types::lenient_string;

/// Response of `GET /search/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    /// Facet name → buckets, in the server's bucket order.
    #[serde(default)]
    pub facets: BTreeMap<String, Vec<FacetBucket>>,
}

impl SearchResponse {
    /// Buckets of facet `name`; empty if the server did not return it.
    pub fn facet(&self, name: &str) -> &[FacetBucket] {
        self.facets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if pages follow this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A matching law with its relevance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub law: LawSummary,
    pub score: Option<f64>,
    /// Highlighted fragments with the server's `<mark>` tags left in place.
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// One facet value and the number of hits carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    #[serde(deserialize_with = "lenient_string")]
    pub key: String,
    pub count: u64,
}

/// Optional refinements for a search. The query text itself is passed
/// separately and always sent as `q`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub domain: Option<String>,
    pub country: Option<String>,
    pub law_type: Option<String>,
    pub status: Option<String>,
    /// Inclusive lower bound on publication date (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive upper bound on publication date (`YYYY-MM-DD`).
    pub date_to: Option<String>,
    /// `"relevance"` (server default) or `"date"`.
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ToQuery for SearchFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("domain", self.domain.as_deref())
            .push_opt("country", self.country.as_deref())
            .push_opt("law_type", self.law_type.as_deref())
            .push_opt("status", self.status.as_deref())
            .push_opt("date_from", self.date_from.as_deref())
            .push_opt("date_to", self.date_to.as_deref())
            .push_opt("sort", self.sort.as_deref())
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size);
        query
    }
}

/// Builds the full search query: `q` first, then the set filters.
pub fn search_query(text: &str, filters: &SearchFilters) -> Query {
    let mut query = Query::new();
    query.push("q", text);
    query.extend(filters.to_query());
    query
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_search_query_always_sends_q_and_skips_unset_filters() {
        let filters = SearchFilters {
            domain: Some("constitutional".into()),
            ..Default::default()
        };
        let query = search_query("constitución", &filters);

        assert_eq!(query.encode(), "q=constituci%C3%B3n&domain=constitutional");
        assert!(query.pairs().iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_search_query_with_empty_text_still_sends_q() {
        let query = search_query("", &SearchFilters::default());
        assert_eq!(query.encode(), "q=");
    }

    #[test]
    fn test_search_response_decodes_facets() {
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [{"id": "es/ce/1978", "title": "Constitución Española", "score": 12.5,
                         "highlights": ["<mark>constitución</mark>"]}],
            "total": 1,
            "page": 1,
            "page_size": 20,
            "total_pages": 1,
            "facets": {
                "domain": [{"key": "constitutional", "count": 1}],
                "year": [{"key": 1978, "count": 1}]
            }
        }))
        .unwrap();

        assert_eq!(response.results[0].law.title, "Constitución Española");
        assert_eq!(response.results[0].score, Some(12.5));
        assert_eq!(response.facet("year")[0].key, "1978");
        assert!(response.facet("country").is_empty());
        assert!(!response.has_more());
    }
}
