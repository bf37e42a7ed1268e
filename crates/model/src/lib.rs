//! Domain layer of the Normativa API client.
//!
//! This crate contains every record, identifier, parameter set and error type
//! the client exchanges with the Normativa REST service, together with the
//! transport-agnostic pieces of the client contract: authentication
//! strategies and the cursor paginator. The `sdk` crate supplies the HTTP
//! transport; it adds no domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no HTTP dependencies.
//! [`PageSource`] is the port through which the [`AutoPaginator`] pulls
//! pages; the `sdk` crate implements it over HTTP.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`LawId`, `Cursor`, `WebhookId`, etc.) |
//! | [`types`] | Shared value types (`Timestamp`, `ResponseBody`) |
//! | [`errors`] | `ApiError` taxonomy and `RetryPolicy` |
//! | [`auth`] | `AuthStrategy` and its API-key / bearer implementations |
//! | [`query`] | Query-string construction |
//! | [`pagination`] | Page envelopes, `PageSource`, `AutoPaginator` |
//! | [`laws`], [`search`], [`bulk`], [`export`], [`webhooks`], [`changelog`] | Per-resource records and filters |

pub mod auth;
pub mod bulk;
pub mod changelog;
pub mod errors;
pub mod export;
pub mod identifiers;
pub mod laws;
pub mod pagination;
pub mod query;
pub mod search;
pub mod types;
pub mod webhooks;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use auth::{ApiKeyAuth, AuthScheme, AuthStrategy, JwtAuth, API_KEY_HEADER, AUTHORIZATION_HEADER};
pub use bulk::ArticleQuery;
pub use changelog::{ChangelogEntry, ChangelogFilters, CorpusStats};
pub use errors::{parse_retry_after, ApiError, RetryPolicy, DEFAULT_RETRY_AFTER_SECS};
pub use export::{export_filename, ExportQuota};
pub use identifiers::{ArticleId, ChangeId, Cursor, EventName, ExportFormat, LawId, WebhookId};
pub use laws::{Article, LawDetail, LawFilters, LawSummary, LawVersion};
pub use pagination::{
    AutoPaginator, CursorParams, CursorResponse, PageRequest, PageSource, PaginatedResponse,
};
pub use query::{Query, ToQuery};
pub use search::{search_query, FacetBucket, SearchFilters, SearchHit, SearchResponse};
pub use types::{ResponseBody, Timestamp};
pub use webhooks::{CreateWebhook, Webhook, WebhookTestResult};
