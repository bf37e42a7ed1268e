//! Law and article records, and the law-listing filters.

use serde::{Deserialize, Serialize};

use crate::query::{Query, ToQuery};
use crate::{ArticleId, LawId, Timestamp};

/// A law as it appears in listings and search results.
///
/// Calendar dates (`publication_date`) are kept as the server's ISO strings;
/// the corpus contains partial dates (`"1889"`, `"1978-12"`) for historical
/// texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawSummary {
    pub id: LawId,
    pub title: String,
    pub country: Option<String>,
    pub jurisdiction: Option<String>,
    pub law_type: Option<String>,
    pub domain: Option<String>,
    pub status: Option<String>,
    pub publication_date: Option<String>,
    pub last_modified: Option<Timestamp>,
    pub article_count: Option<u64>,
}

/// Full record returned by `GET /laws/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawDetail {
    #[serde(flatten)]
    pub law: LawSummary,
    pub summary: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub versions: Vec<LawVersion>,
}

/// One article of a law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    /// Owning law. Omitted by the server when the article is nested inside a
    /// [`LawDetail`].
    pub law_id: Option<LawId>,
    /// Article number as printed (`"1"`, `"14 bis"`, `"Disposición adicional primera"`).
    pub number: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
    pub position: Option<u32>,
    pub updated_at: Option<Timestamp>,
}

/// A consolidated version of a law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawVersion {
    pub version: String,
    pub effective_date: Option<String>,
    pub note: Option<String>,
}

/// Filters for `GET /laws/`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawFilters {
    pub country: Option<String>,
    pub jurisdiction: Option<String>,
    pub law_type: Option<String>,
    pub domain: Option<String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    /// Server ordering key, e.g. `"-publication_date"`.
    pub ordering: Option<String>,
}

impl ToQuery for LawFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("country", self.country.as_deref())
            .push_opt("jurisdiction", self.jurisdiction.as_deref())
            .push_opt("law_type", self.law_type.as_deref())
            .push_opt("domain", self.domain.as_deref())
            .push_opt("status", self.status.as_deref())
            .push_opt("year", self.year)
            .push_opt("ordering", self.ordering.as_deref());
        query
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_law_detail_flattens_summary_fields() {
        let detail: LawDetail = serde_json::from_value(json!({
            "id": "es/ley/2015/39",
            "title": "Ley 39/2015",
            "country": "ES",
            "publication_date": "2015-10-02",
            "summary": "Procedimiento administrativo común.",
            "source_url": "https://boe.es/eli/es/l/2015/10/01/39",
            "articles": [{"id": 1, "number": "1", "text": "Objeto de la Ley."}],
            "unknown_field": true
        }))
        .unwrap();

        assert_eq!(detail.law.id.as_str(), "es/ley/2015/39");
        assert_eq!(detail.law.country.as_deref(), Some("ES"));
        assert_eq!(detail.summary.as_deref(), Some("Procedimiento administrativo común."));
        assert_eq!(detail.articles.len(), 1);
        assert_eq!(detail.articles[0].id.as_str(), "1");
        assert!(detail.articles[0].law_id.is_none());
        assert!(detail.versions.is_empty());
    }

    #[test]
    fn test_law_filters_query_contains_only_set_fields() {
        let filters = LawFilters {
            country: Some("ES".into()),
            year: Some(1978),
            ..Default::default()
        };
        assert_eq!(filters.to_query().encode(), "country=ES&year=1978");
        assert!(LawFilters::default().to_query().is_empty());
    }
}
