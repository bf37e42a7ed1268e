//! Client configuration.
//!
//! A [`ClientConfig`] is validated once, when it is built, and is immutable
//! afterwards. Every client built from it shares the same credential, base
//! URL and timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use model::{ApiError, AuthScheme, AuthStrategy};
use reqwest::header::HeaderValue;
use reqwest::Url;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.normativa.dev/api/v1";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key (required by [`ClientConfig::from_env`]).
pub const API_KEY_ENV: &str = "NORMATIVA_API_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "NORMATIVA_BASE_URL";
/// Environment variable overriding [`DEFAULT_TIMEOUT`], in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "NORMATIVA_TIMEOUT_MS";

/// Validated client settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    auth_scheme: AuthScheme,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if `api_key` is blank or not a
    /// valid header value.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder(api_key).build()
    }

    /// Starts a builder for `api_key`.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_key: api_key.into(),
            base_url: None,
            timeout: None,
            auth_scheme: AuthScheme::default(),
        }
    }

    /// Reads the configuration from `NORMATIVA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the API key is missing or any
    /// value fails validation.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let api_key = lookup(API_KEY_ENV)
            .ok_or_else(|| ApiError::configuration(format!("{API_KEY_ENV} is not set")))?;

        let mut builder = Self::builder(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = lookup(TIMEOUT_MS_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                ApiError::configuration(format!("{TIMEOUT_MS_ENV} must be an integer, got '{raw}'"))
            })?;
            builder = builder.timeout(Duration::from_millis(millis));
        }
        builder.build()
    }

    /// The credential sent with every request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// How the credential is attached to requests.
    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }

    /// Builds the [`AuthStrategy`] for the configured scheme and credential.
    pub fn auth_strategy(&self) -> Arc<dyn AuthStrategy> {
        self.auth_scheme.strategy(&self.api_key)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

// ---------------------------------------------------------------------------

/// Builder for [`ClientConfig`]; validation happens in [`ClientConfigBuilder::build`].
#[derive(Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
    auth_scheme: AuthScheme,
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

impl ClientConfigBuilder {
    /// Overrides [`DEFAULT_BASE_URL`] (e.g. a staging origin or a local mock).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Selects how the credential is sent; defaults to [`AuthScheme::ApiKey`].
    pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the credential is blank or not
    /// a valid header value, the timeout is zero, or the base URL is not an
    /// absolute `http`/`https` URL.
    pub fn build(self) -> Result<ClientConfig, ApiError> {
        let api_key = self.api_key.trim().to_owned();
        if api_key.is_empty() {
            return Err(ApiError::configuration("API key must not be empty"));
        }
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(ApiError::configuration(
                "API key contains characters not allowed in an HTTP header",
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ApiError::configuration("timeout must be greater than zero"));
        }

        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout,
            auth_scheme: self.auth_scheme,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ApiError::configuration(format!("invalid base URL '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::configuration(format!(
            "base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.auth_scheme(), AuthScheme::ApiKey);
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let config = ClientConfig::builder("key")
            .base_url("https://staging.normativa.dev/api/v1//")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "https://staging.normativa.dev/api/v1");
    }

    #[test]
    fn test_rejects_blank_key_zero_timeout_and_bad_url() {
        assert!(matches!(ClientConfig::new("  "), Err(ApiError::Configuration { .. })));
        assert!(ClientConfig::new("bad\nkey").is_err());
        assert!(ClientConfig::builder("key").timeout(Duration::ZERO).build().is_err());
        assert!(ClientConfig::builder("key").base_url("not a url").build().is_err());
        assert!(ClientConfig::builder("key").base_url("ftp://files.example").build().is_err());
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (API_KEY_ENV, "k-1"),
            (BASE_URL_ENV, "http://localhost:8000/api/v1/"),
            (TIMEOUT_MS_ENV, "2500"),
        ]);
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api_key(), "k-1");
        assert_eq!(config.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_from_lookup_requires_api_key() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
