//! The [`Client`] facade.

use std::sync::Arc;

use model::ApiError;
use tracing::info;

use crate::config::ClientConfig;
use crate::endpoints::{Bulk, Changelog, Export, Laws, Search, Stats, Webhooks};
use crate::RequestEngine;

/// Entry point to the Normativa API.
///
/// One client owns one [`RequestEngine`] (and so one connection pool). It is
/// cheap to clone and safe to share across tasks; every endpoint accessor
/// returns a façade over the same engine.
///
/// ```no_run
/// # async fn run() -> Result<(), model::ApiError> {
/// use sdk::{Client, ClientConfig};
/// use model::{LawFilters, PageRequest};
///
/// let client = Client::new(ClientConfig::new("my-key")?)?;
/// let page = client
///     .laws()
///     .list(&LawFilters::default(), &PageRequest::new(1, 20))
///     .await?;
/// println!("{} laws", page.count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    engine: Arc<RequestEngine>,
}

impl Client {
    /// Builds a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP stack cannot be set up.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        info!(
            base_url = %config.base_url(),
            timeout_ms = config.timeout().as_millis() as u64,
            "creating API client"
        );
        let engine = RequestEngine::new(config)?;
        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    /// Builds a client from `NORMATIVA_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Configuration the client was built from.
    pub fn config(&self) -> &ClientConfig {
        self.engine.config()
    }

    /// The shared engine, for endpoints this crate does not wrap yet.
    pub fn engine(&self) -> &RequestEngine {
        &self.engine
    }

    /// Law listing, detail and articles.
    pub fn laws(&self) -> Laws {
        Laws::new(Arc::clone(&self.engine))
    }

    /// Full-text search.
    pub fn search(&self) -> Search {
        Search::new(Arc::clone(&self.engine))
    }

    /// Cursor-paginated article export.
    pub fn bulk(&self) -> Bulk {
        Bulk::new(Arc::clone(&self.engine))
    }

    /// Document downloads and quota.
    pub fn export(&self) -> Export {
        Export::new(Arc::clone(&self.engine))
    }

    /// Webhook subscriptions.
    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(Arc::clone(&self.engine))
    }

    /// Corpus change feed.
    pub fn changelog(&self) -> Changelog {
        Changelog::new(Arc::clone(&self.engine))
    }

    /// Corpus statistics.
    pub fn stats(&self) -> Stats {
        Stats::new(Arc::clone(&self.engine))
    }
}
