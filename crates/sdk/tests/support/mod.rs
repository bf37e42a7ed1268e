//! Shared fixtures for the HTTP-level tests.

#![allow(dead_code)]

use std::time::Duration;

use model::AuthScheme;
use sdk::{Client, ClientConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "test-key-123";

/// Starts a mock server and a client pointed at its `/api/v1` prefix.
pub async fn client_with(scheme: AuthScheme, timeout: Duration) -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = ClientConfig::builder(API_KEY)
        .base_url(format!("{}/api/v1/", server.uri()))
        .timeout(timeout)
        .auth_scheme(scheme)
        .build()
        .expect("valid config");
    let client = Client::new(config).expect("client");
    (server, client)
}

pub async fn client() -> (MockServer, Client) {
    client_with(AuthScheme::ApiKey, Duration::from_secs(5)).await
}

pub fn law_summary(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Law {id}"),
        "country": "es",
        "jurisdiction": "national",
        "law_type": "ley",
        "domain": "administrative",
        "status": "in_force",
        "publication_date": "2015-10-02",
        "last_modified": "2025-03-01T10:00:00Z",
        "article_count": 133
    })
}

pub fn article(id: &str) -> Value {
    json!({
        "id": id,
        "law_id": "es/ley/2015/39",
        "number": "1",
        "title": "Objeto",
        "text": "La presente ley tiene por objeto...",
        "position": 1
    })
}

pub fn cursor_page(ids: &[&str], next_cursor: Option<&str>) -> Value {
    json!({
        "count": 5,
        "next_cursor": next_cursor,
        "page_size": ids.len(),
        "results": ids.iter().map(|id| article(id)).collect::<Vec<_>>()
    })
}

pub fn stats() -> Value {
    json!({
        "total_laws": 12000,
        "total_articles": 480000,
        "countries": {"es": 9000, "pt": 3000},
        "domains": {"civil": 4000},
        "last_updated": "2025-06-01T00:00:00Z"
    })
}
