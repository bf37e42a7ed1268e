//! Error taxonomy and retry-policy types for the Normativa client.
//!
//! [`ApiError`] is the single failure channel of every client operation. The
//! HTTP-derived variants come from [`ApiError::from_status`], a total mapping
//! over non-2xx status codes: each status produces exactly one variant.
//!
//! [`RetryPolicy`] is the machine-actionable half of the taxonomy. The client
//! itself never retries; callers consult [`ApiError::retry_policy`] (or match
//! on [`ApiError::RateLimited`] directly) to decide whether to sleep and try
//! again.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ResponseBody;

/// Back-off applied when a 429 response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

const AUTH_DEFAULT_MESSAGE: &str = "authentication failed";
const FORBIDDEN_DEFAULT_MESSAGE: &str = "insufficient permissions";
const RATE_LIMIT_DEFAULT_MESSAGE: &str = "rate limit exceeded";

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// ## Rules
///
/// - `Retryable` errors: rate limiting, timeouts, transport failures, 5xx
///   and 408 responses.
/// - `NonRetryable` errors: authentication and permission failures, every
///   other 4xx, undecodable bodies, invalid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    ///
    /// `after` optionally specifies the minimum delay before retrying (derived
    /// from the `Retry-After` response header).
    Retryable {
        /// Minimum back-off before the next attempt. `None` means retry
        /// immediately or apply the caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried without changing the request or the
    /// credentials.
    NonRetryable,
}

impl RetryPolicy {
    /// Returns `true` for [`RetryPolicy::Retryable`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }
}

// ---------------------------------------------------------------------------
// Client errors
// ---------------------------------------------------------------------------

/// Errors returned by every client operation.
///
/// The first four variants are produced from non-2xx responses and always
/// carry the response body for diagnostics. The remaining variants cover
/// failures that happen before or around the HTTP exchange.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// The server rejected the credentials (HTTP 401).
    #[error("{message}")]
    Auth {
        /// Server `error` message, or `"authentication failed"`.
        message: String,
        /// Parsed-or-raw response payload.
        body: ResponseBody,
    },

    /// The credentials are valid but lack permission (HTTP 403).
    #[error("{message}")]
    Forbidden {
        /// Server `error` message, or `"insufficient permissions"`.
        message: String,
        /// Parsed-or-raw response payload.
        body: ResponseBody,
    },

    /// The caller exceeded its request quota (HTTP 429).
    ///
    /// Sleep for `retry_after_secs` before retrying.
    #[error("{message} (retry after {retry_after_secs}s)")]
    RateLimited {
        /// Seconds from the `Retry-After` header; 60 when absent or not an integer.
        retry_after_secs: u64,
        /// Server `error` message, or `"rate limit exceeded"`.
        message: String,
        /// Parsed-or-raw response payload.
        body: ResponseBody,
    },

    /// Any other non-2xx response.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server `error` message, or `"HTTP {status}: {reason}"`.
        message: String,
        /// Parsed-or-raw response payload.
        body: ResponseBody,
    },

    /// No response arrived within the configured timeout; the in-flight
    /// request was aborted.
    #[error("request timed out after {after:?}")]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// The request could not be sent or the response could not be read
    /// (DNS, connection refused, TLS, interrupted body).
    #[error("transport error: {message}")]
    Transport {
        /// Description from the underlying HTTP stack.
        message: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("could not decode response: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The client configuration is invalid.
    ///
    /// Produced at construction time; a client never starts with an invalid
    /// configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ApiError {
    /// Maps a non-2xx response onto the taxonomy.
    ///
    /// - 401 → [`ApiError::Auth`]
    /// - 403 → [`ApiError::Forbidden`]
    /// - 429 → [`ApiError::RateLimited`] with `retry_after` parsed as integer
    ///   seconds, defaulting to [`DEFAULT_RETRY_AFTER_SECS`]
    /// - anything else → [`ApiError::Http`]
    ///
    /// `reason` is the canonical reason phrase for `status`, if known.
    pub fn from_status(
        status: u16,
        reason: Option<&str>,
        retry_after: Option<&str>,
        body: ResponseBody,
    ) -> Self {
        let server_message = body.error_message().map(str::to_owned);
        match status {
            401 => Self::Auth {
                message: server_message.unwrap_or_else(|| AUTH_DEFAULT_MESSAGE.to_owned()),
                body,
            },
            403 => Self::Forbidden {
                message: server_message.unwrap_or_else(|| FORBIDDEN_DEFAULT_MESSAGE.to_owned()),
                body,
            },
            429 => Self::RateLimited {
                retry_after_secs: parse_retry_after(retry_after),
                message: server_message.unwrap_or_else(|| RATE_LIMIT_DEFAULT_MESSAGE.to_owned()),
                body,
            },
            _ => Self::Http {
                status,
                message: server_message.unwrap_or_else(|| match reason {
                    Some(reason) => format!("HTTP {status}: {reason}"),
                    None => format!("HTTP {status}"),
                }),
                body,
            },
        }
    }

    /// HTTP status code for response-derived variants.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::RateLimited { .. } => Some(429),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response payload for response-derived variants.
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            Self::Auth { body, .. }
            | Self::Forbidden { body, .. }
            | Self::RateLimited { body, .. }
            | Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Human-readable message without the variant's decoration.
    pub fn message(&self) -> String {
        match self {
            Self::Auth { message, .. }
            | Self::Forbidden { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Http { message, .. }
            | Self::Transport { message }
            | Self::Decode { message }
            | Self::Configuration { message } => message.clone(),
            Self::Timeout { .. } => self.to_string(),
        }
    }

    /// Suggested wait before retrying, for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after_secs, ..
            } => Some(Duration::from_secs(*retry_after_secs)),
            _ => None,
        }
    }

    /// Whether, and when, the failed operation may be retried.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::RateLimited { .. } => RetryPolicy::Retryable {
                after: self.retry_after(),
            },
            Self::Timeout { .. } | Self::Transport { .. } => RetryPolicy::Retryable { after: None },
            Self::Http { status, .. } if *status >= 500 || *status == 408 => {
                RetryPolicy::Retryable { after: None }
            }
            _ => RetryPolicy::NonRetryable,
        }
    }

    /// Stable, low-cardinality label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "auth",
            Self::Forbidden { .. } => "forbidden",
            Self::RateLimited { .. } => "rate_limited",
            Self::Http { .. } => "http",
            Self::Timeout { .. } => "timeout",
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
            Self::Configuration { .. } => "configuration",
        }
    }

    /// Shorthand for [`ApiError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Parses a `Retry-After` header as integer seconds.
///
/// HTTP-date values and anything else non-numeric fall back to
/// [`DEFAULT_RETRY_AFTER_SECS`].
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
