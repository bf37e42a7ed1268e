//! Query-string construction.
//!
//! Endpoint parameters are collected into a [`Query`]: an ordered list of
//! key/value pairs. Unset optional parameters are never added, so the server
//! applies its own defaults instead of receiving `key=`.

use std::fmt::Display;

/// Ordered, URL-encodable query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value`.
    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Appends `key=value` when `value` is `Some` and renders non-empty.
    pub fn push_opt<V: Display>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let rendered = value.to_string();
            if !rendered.is_empty() {
                self.pairs.push((key, rendered));
            }
        }
        self
    }

    /// Appends every pair of `other`, preserving order.
    pub fn extend(&mut self, other: Query) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The recorded pairs, in insertion order.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encoded `k=v&k=v` form (no leading `?`).
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends this query to `path`, joining with `&` if `path` already has a
    /// query component and `?` otherwise. An empty query leaves `path` as is.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_owned();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{}", self.encode())
    }
}

/// Parameter sets that render into query-string pairs.
pub trait ToQuery {
    /// Renders the set parameters; unset ones are omitted.
    fn to_query(&self) -> Query;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_opt_skips_none_and_empty() {
        let mut query = Query::new();
        query
            .push_opt("domain", Some("civil"))
            .push_opt::<&str>("country", None)
            .push_opt("status", Some(""));
        assert_eq!(query.encode(), "domain=civil");
    }

    #[test]
    fn test_encode_percent_encodes_values() {
        let mut query = Query::new();
        query.push("q", "constitución española").push("page", 2);
        assert_eq!(query.encode(), "q=constituci%C3%B3n%20espa%C3%B1ola&page=2");
    }

    #[test]
    fn test_append_to_uses_question_mark_or_ampersand() {
        let mut query = Query::new();
        query.push("page", 1);
        assert_eq!(query.append_to("/laws/"), "/laws/?page=1");
        assert_eq!(query.append_to("/laws/?format=json"), "/laws/?format=json&page=1");
        assert_eq!(Query::new().append_to("/laws/"), "/laws/");
    }

    #[test]
    fn test_get_returns_first_value() {
        let mut query = Query::new();
        query.push("q", "a").push("q", "b");
        assert_eq!(query.get("q"), Some("a"));
        assert_eq!(query.get("missing"), None);
    }
}
