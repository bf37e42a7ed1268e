//! Async client for the Normativa legal-corpus REST API.
//!
//! This crate holds everything that touches the network. The domain records,
//! error taxonomy, auth strategies and cursor paginator live in the `model`
//! crate and are re-exported here as [`model`].
//!
//! # Layout
//!
//! - [`config`]: validated [`ClientConfig`] (credential, base URL, timeout)
//! - [`engine`]: [`RequestEngine`], the only component that performs HTTP
//! - [`endpoints`]: one façade per resource family
//! - [`Client`]: the facade handing out endpoint façades
//! - [`StatsCache`]: TTL cache in front of `GET /stats/`
//!
//! Nothing here retries. Callers that want retries inspect
//! [`model::ApiError::retry_policy`] and schedule their own.

pub mod config;
pub mod endpoints;
pub mod engine;

mod client;
mod stats_cache;

pub use model;

pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use engine::{RawResponse, RequestEngine, USER_AGENT};
pub use stats_cache::{StatsCache, DEFAULT_STATS_TTL};
