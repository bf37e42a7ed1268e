//! Corpus changelog and aggregate statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::{Query, ToQuery};
use crate::{ChangeId, LawId, Timestamp};

/// One recorded change to a law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub id: ChangeId,
    pub law_id: LawId,
    /// `"created"`, `"amended"`, `"repealed"`, ...
    pub change_type: String,
    pub summary: Option<String>,
    pub changed_at: Timestamp,
}

/// Filters for `GET /changelog/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogFilters {
    /// Only changes at or after this RFC 3339 instant.
    pub since: Option<String>,
    pub law_id: Option<LawId>,
    pub change_type: Option<String>,
}

impl ToQuery for ChangelogFilters {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("since", self.since.as_deref())
            .push_opt("law_id", self.law_id.as_ref())
            .push_opt("change_type", self.change_type.as_deref());
        query
    }
}

/// Corpus-wide counters from `GET /stats/`, as shown on dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_laws: u64,
    pub total_articles: u64,
    #[serde(default)]
    pub countries: BTreeMap<String, u64>,
    #[serde(default)]
    pub domains: BTreeMap<String, u64>,
    pub last_updated: Option<Timestamp>,
}
