//! Shared value types used across the response records.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values (timestamps, raw error payloads) rather than identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp as reported by the server (RFC 3339).
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Error payloads
// ---------------------------------------------------------------------------

/// The payload of a failed response: parsed JSON when the body was valid
/// JSON, otherwise the raw text.
///
/// The server's error contract is a JSON object with an optional `error`
/// string field, but proxies and load balancers in front of it routinely
/// answer with HTML or plain text, so both shapes are preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that was not valid JSON (possibly empty).
    Text(String),
}

impl ResponseBody {
    /// Parses `raw` as JSON, falling back to keeping it as text.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw.to_owned()),
        }
    }

    /// The server-supplied `error` message, if the body is a JSON object
    /// carrying a string `error` field.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("error").and_then(Value::as_str),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` for an empty text body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl std::fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient scalars
// ---------------------------------------------------------------------------

/// A JSON scalar that may arrive as either a string or an integer.
///
/// Used by identifier and facet-key deserialization; the server has changed
/// the representation of several keys between releases.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StringOrNumber {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl StringOrNumber {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
        }
    }
}

/// `deserialize_with` helper for `String` fields that may arrive as integers.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_response_body_parse_json() {
        let body = ResponseBody::parse(r#"{"error":"bad key"}"#);
        assert_eq!(body, ResponseBody::Json(json!({"error": "bad key"})));
        assert_eq!(body.error_message(), Some("bad key"));
    }

    #[test]
    fn test_response_body_falls_back_to_text() {
        let body = ResponseBody::parse("<html>502 Bad Gateway</html>");
        assert_eq!(body, ResponseBody::Text("<html>502 Bad Gateway</html>".into()));
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn test_error_message_ignores_non_string_error_field() {
        let body = ResponseBody::parse(r#"{"error":{"code":3}}"#);
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn test_empty_body() {
        let body = ResponseBody::parse("");
        assert!(body.is_empty());
    }

    #[test]
    fn test_timestamp_roundtrips_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-03-01T10:00:00Z\"").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T10:00:00+00:00");
    }
}
