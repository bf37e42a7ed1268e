use std::sync::Arc;

use model::{ApiError, CreateWebhook, Query, Webhook, WebhookId, WebhookTestResult};
use reqwest::Method;
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::RequestEngine;

/// Webhook subscription management.
#[derive(Debug, Clone)]
pub struct Webhooks {
    engine: Arc<RequestEngine>,
}

/// `GET /webhooks/` answers with a bare array on older deployments and a
/// paginated envelope on newer ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum WebhookList {
    Plain(Vec<Webhook>),
    Paged { results: Vec<Webhook> },
}

impl Webhooks {
    pub(crate) fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// Subscribes a URL to events (`POST /webhooks/`).
    pub async fn create(&self, request: &CreateWebhook) -> Result<Webhook, ApiError> {
        self.engine
            .send_json(Method::POST, "/webhooks/", Some(request))
            .await
    }

    /// All subscriptions owned by the caller (`GET /webhooks/`).
    pub async fn list(&self) -> Result<Vec<Webhook>, ApiError> {
        let list: WebhookList = self.engine.get_json("/webhooks/", &Query::new()).await?;
        Ok(match list {
            WebhookList::Plain(hooks) | WebhookList::Paged { results: hooks } => hooks,
        })
    }

    /// Removes a subscription (`DELETE /webhooks/{id}/`).
    ///
    /// Any 2xx answer counts as success; its body, if any, is discarded.
    pub async fn delete(&self, id: WebhookId) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .engine
            .send_empty(Method::DELETE, &format!("/webhooks/{id}/"))
            .await?;
        Ok(())
    }

    /// Asks the server to deliver a test event (`POST /webhooks/{id}/test/`).
    pub async fn test(&self, id: WebhookId) -> Result<WebhookTestResult, ApiError> {
        self.engine
            .send_empty(Method::POST, &format!("/webhooks/{id}/test/"))
            .await
    }
}
