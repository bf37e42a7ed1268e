//! Authentication strategies.
//!
//! An [`AuthStrategy`] produces the authentication headers for one request.
//! The request engine calls it once per request and merges the result with
//! its own headers, so endpoint code never knows which scheme is in use.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Header carrying a server-to-server API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying a bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Produces the authentication headers attached to every request.
///
/// Implementations must be pure: same output for the same instance, no I/O,
/// no refresh. Token refresh, if ever needed, belongs in a new strategy that
/// is swapped in by rebuilding the client.
pub trait AuthStrategy: Send + Sync + fmt::Debug {
    /// Header name/value pairs for one request.
    fn headers(&self) -> Vec<(&'static str, String)>;
}

// ---------------------------------------------------------------------------

/// API-key authentication: `X-API-Key: <key>`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyAuth {
    key: String,
}

impl ApiKeyAuth {
    /// Creates the strategy for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl AuthStrategy for ApiKeyAuth {
    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![(API_KEY_HEADER, self.key.clone())]
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth").field("key", &"<redacted>").finish()
    }
}

// ---------------------------------------------------------------------------

/// Bearer-token authentication: `Authorization: Bearer <token>`.
///
/// Used in delegated contexts where the caller holds a user JWT rather than
/// an API key.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtAuth {
    token: String,
}

impl JwtAuth {
    /// Creates the strategy for `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthStrategy for JwtAuth {
    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![(AUTHORIZATION_HEADER, format!("Bearer {}", self.token))]
    }
}

impl fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAuth").field("token", &"<redacted>").finish()
    }
}

// ---------------------------------------------------------------------------

/// Which [`AuthStrategy`] a configured credential is used with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// Send the credential as `X-API-Key`.
    #[default]
    ApiKey,
    /// Send the credential as `Authorization: Bearer`.
    Bearer,
}

impl AuthScheme {
    /// Builds the strategy for this scheme around `credential`.
    pub fn strategy(self, credential: &str) -> Arc<dyn AuthStrategy> {
        match self {
            Self::ApiKey => Arc::new(ApiKeyAuth::new(credential)),
            Self::Bearer => Arc::new(JwtAuth::new(credential)),
        }
    }
}
