//! Webhook subscription records.

use serde::{Deserialize, Serialize};

use crate::{EventName, Timestamp, WebhookId};

/// A webhook subscription as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: WebhookId,
    pub url: String,
    #[serde(default)]
    pub events: Vec<EventName>,
    /// Only deliver events for laws in this domain.
    pub domain_filter: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub created_at: Option<Timestamp>,
    pub last_triggered_at: Option<Timestamp>,
}

fn active_by_default() -> bool {
    true
}

/// Body of `POST /webhooks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebhook {
    pub url: String,
    pub events: Vec<EventName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_filter: Option<String>,
}

/// Outcome of `POST /webhooks/{id}/test/`: the server sends a synthetic event
/// to the subscription URL and reports what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookTestResult {
    pub success: bool,
    /// Status code returned by the subscriber endpoint, if it answered.
    pub status_code: Option<u16>,
    pub message: Option<String>,
}
