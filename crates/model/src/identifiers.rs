//! Newtype domain identifiers.
//!
//! Every resource the API exposes with an identity is represented as a
//! distinct newtype wrapping a primitive. This prevents accidentally passing,
//! for example, a [`LawId`] where an [`ArticleId`] is expected even though
//! both are strings on the wire.
//!
//! String-backed identifiers deserialize leniently: the server is free to
//! emit them as JSON strings or integers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::StringOrNumber;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display and a
// Deserialize impl that accepts strings or integers.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                StringOrNumber::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (server-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: server-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies a webhook subscription.
    ///
    /// Assigned by the server on creation; used by the delete and test
    /// operations.
    WebhookId
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a law in the corpus (e.g. `"es/ley/2015/39"`).
    ///
    /// Law identifiers may contain slashes and punctuation; they are always
    /// percent-encoded before being interpolated into a request path.
    LawId
}

string_id! {
    /// Identifies a single article within a law.
    ArticleId
}

string_id! {
    /// Identifies a changelog entry.
    ChangeId
}

string_id! {
    /// Opaque continuation token returned by cursor-paginated endpoints.
    ///
    /// Clients never inspect or construct cursors; they only echo back the
    /// value the previous page returned.
    Cursor
}

string_id! {
    /// A webhook event name (e.g. `"law.updated"`).
    EventName
}

string_id! {
    /// An export format understood by the export endpoint (e.g. `"pdf"`,
    /// `"latex"`, `"markdown"`).
    ///
    /// Kept open-ended so new server formats work without a client release;
    /// the quota endpoint reports which ones the caller's tier may use.
    ExportFormat
}

impl ExportFormat {
    /// File extension used when saving a download in this format.
    ///
    /// `latex` maps to `tex`; every other format is its own extension.
    pub fn extension(&self) -> &str {
        match self.0.as_str() {
            "latex" => "tex",
            other => other,
        }
    }
}

impl LawId {
    /// Returns the identifier percent-encoded for use as a single path segment.
    pub fn to_path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}
