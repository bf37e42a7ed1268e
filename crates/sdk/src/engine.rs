//! The request engine: the single place where HTTP exchanges happen.
//!
//! Every endpoint call goes through one of three operations:
//!
//! | Operation | Method | Response |
//! |-----------|--------|----------|
//! | [`RequestEngine::get_json`] | GET | JSON decoded into `T` |
//! | [`RequestEngine::get_raw`] | GET | undecoded [`RawResponse`] (downloads) |
//! | [`RequestEngine::send_json`] | POST / PUT / PATCH / DELETE | JSON decoded into `T` |
//!
//! Each exchange is raced against the configured timeout. When the timer
//! wins, the in-flight request future is dropped (which aborts the
//! connection) and [`ApiError::Timeout`] is returned. The timer belongs to
//! the exchange and is released on every exit path.
//!
//! Non-2xx responses are mapped by [`ApiError::from_status`]. The engine
//! never retries.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use model::{ApiError, AuthStrategy, Query, ResponseBody};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("normativa-sdk/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Performs authenticated HTTP exchanges against the configured base URL.
///
/// Holds no per-call state: concurrent calls on one engine are independent.
#[derive(Debug)]
pub struct RequestEngine {
    http: reqwest::Client,
    config: ClientConfig,
    auth: Arc<dyn AuthStrategy>,
}

impl RequestEngine {
    /// Builds an engine with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be
    /// initialised (e.g. no TLS backend available).
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::configuration(format!("failed to build HTTP client: {e}")))?;
        let auth = config.auth_strategy();
        Ok(Self { http, config, auth })
    }

    /// Configuration this engine was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for `path` plus `query`.
    ///
    /// `path` is joined to the base URL with exactly one slash.
    pub fn url(&self, path: &str, query: &Query) -> String {
        let path = query.append_to(path);
        if path.starts_with('/') {
            format!("{}{}", self.config.base_url(), path)
        } else {
            format!("{}/{}", self.config.base_url(), path)
        }
    }

    /// GET `path` and decode the JSON body into `T`.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query);
        debug!(url = %url, "GET request");
        let request = self.request(Method::GET, &url);
        self.exchange(request, decode_json).await
    }

    /// GET `path` and hand back the undecoded response.
    ///
    /// The timeout covers the exchange up to the response headers; reading
    /// the body afterwards is paced by the caller.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_raw(&self, path: &str, query: &Query) -> Result<RawResponse, ApiError> {
        let url = self.url(path, query);
        debug!(url = %url, "GET raw request");
        let request = self.request(Method::GET, &url);
        self.exchange(request, |response| async move { Ok(RawResponse::new(response)) })
            .await
    }

    /// Sends `body` (if any) as JSON with `method` and decodes the JSON reply.
    ///
    /// An empty 2xx body decodes as JSON `null`, so `T = ()` suits endpoints
    /// that answer `204 No Content`.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &Query::new());
        debug!(url = %url, "sending request");
        let mut request = self.request(method, &url);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|e| ApiError::Decode {
                message: format!("failed to encode request body: {e}"),
            })?;
            request = request.header(CONTENT_TYPE, JSON).body(payload);
        }
        self.exchange(request, decode_json).await
    }

    /// [`RequestEngine::send_json`] without a request body.
    pub async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T, ApiError> {
        self.send_json::<(), T>(method, path, None).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.auth
            .headers()
            .into_iter()
            .fold(self.http.request(method, url).header(ACCEPT, JSON), |request, (name, value)| {
                request.header(name, value)
            })
    }

    /// Sends `request`, maps non-2xx statuses, then runs `read` on the
    /// response; the whole sequence is bounded by the configured timeout.
    async fn exchange<F, Fut, R>(&self, request: RequestBuilder, read: F) -> Result<R, ApiError>
    where
        F: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        let timeout = self.config.timeout();
        let exchange = async {
            let response = request.send().await.map_err(transport_error)?;
            let response = check_status(response).await?;
            read(response).await
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "request timed out");
                Err(ApiError::Timeout { after: timeout })
            }
        }
    }
}

/// Passes 2xx responses through and maps everything else onto [`ApiError`].
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        debug!(status = status.as_u16(), "request succeeded");
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "failed to read error response body");
            String::new()
        }
    };
    let error = ApiError::from_status(
        status.as_u16(),
        status.canonical_reason(),
        retry_after.as_deref(),
        ResponseBody::parse(&text),
    );
    warn!(status = status.as_u16(), kind = error.kind(), error = %error, "request failed");
    Err(error)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    let decoded = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(&bytes)
    };
    decoded.map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Flattens a reqwest error and its sources into one message.
fn transport_error(err: reqwest::Error) -> ApiError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    ApiError::Transport { message }
}

// ---------------------------------------------------------------------------
// Raw responses
// ---------------------------------------------------------------------------

/// A successful response whose body has not been read yet.
///
/// Returned by download endpoints so the caller decides whether to buffer,
/// stream, or save the payload.
#[derive(Debug)]
pub struct RawResponse {
    inner: Response,
}

impl RawResponse {
    fn new(inner: Response) -> Self {
        Self { inner }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// The `Content-Type` header, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.inner
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Declared body length, when the server sent one.
    pub fn content_length(&self) -> Option<u64> {
        self.inner.content_length()
    }

    /// The `filename` parameter of a `Content-Disposition` header.
    pub fn filename_hint(&self) -> Option<String> {
        self.inner
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_disposition_filename)
    }

    /// Reads the whole body into memory.
    pub async fn bytes(self) -> Result<Vec<u8>, ApiError> {
        self.inner
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(transport_error)
    }

    /// Reads the whole body as text.
    pub async fn text(self) -> Result<String, ApiError> {
        self.inner.text().await.map_err(transport_error)
    }

    /// Streams the body chunk by chunk.
    pub fn bytes_stream(self) -> impl Stream<Item = Result<Vec<u8>, ApiError>> {
        self.inner
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(transport_error))
    }

    /// Streams the body into a file at `path`, returning the bytes written.
    pub async fn save_to(mut self, path: impl AsRef<Path>) -> Result<u64, ApiError> {
        let path = path.as_ref();
        let io_error = |e: std::io::Error| ApiError::Transport {
            message: format!("failed to write {}: {e}", path.display()),
        };

        let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
        let mut written = 0u64;
        while let Some(chunk) = self.inner.chunk().await.map_err(transport_error)? {
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_error)?;
        debug!(path = %path.display(), bytes = written, "download saved");
        Ok(written)
    }

    /// The underlying reqwest response.
    pub fn into_inner(self) -> Response {
        self.inner
    }
}

fn parse_disposition_filename(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        let value = value.trim_matches('"');
        (!value.is_empty()).then(|| value.to_owned())
    })
}
