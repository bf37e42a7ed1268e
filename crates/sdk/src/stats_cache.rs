//! Time-bounded cache for corpus statistics.
//!
//! Statistics change slowly and dashboards poll them often. [`StatsCache`]
//! keeps the last successful answer for a fixed TTL. Concurrent callers that
//! find the cache cold wait on one in-flight request instead of each issuing
//! their own. Failures are never cached.

use std::time::{Duration, Instant};

use model::{ApiError, CorpusStats};
use tokio::sync::Mutex;
use tracing::debug;

use crate::Client;

/// Default freshness window for cached statistics.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(300);

/// Shared cache for `GET /stats/`; hold one per process behind an `Arc`.
#[derive(Debug)]
pub struct StatsCache {
    ttl: Duration,
    entry: Mutex<Option<(Instant, CorpusStats)>>,
}

impl StatsCache {
    /// An empty cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns cached statistics while fresh, otherwise fetches them through
    /// `client` and caches the result.
    pub async fn get_or_fetch(&self, client: &Client) -> Result<CorpusStats, ApiError> {
        // Held across the fetch so concurrent misses share one request.
        let mut entry = self.entry.lock().await;
        if let Some((fetched_at, stats)) = entry.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!("stats cache hit");
                return Ok(stats.clone());
            }
        }

        debug!("stats cache miss");
        let stats = client.stats().get().await?;
        *entry = Some((Instant::now(), stats.clone()));
        Ok(stats)
    }

    /// Drops the cached value; the next call fetches again.
    pub async fn invalidate(&self) {
        self.entry.lock().await.take();
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_STATS_TTL)
    }
}
