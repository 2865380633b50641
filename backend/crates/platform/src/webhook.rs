//! Webhook delivery
//!
//! Minimal client for Discord-compatible "execute webhook" endpoints.
//! Payloads are a list of embeds; the client knows nothing about what the
//! embeds describe.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Webhook delivery errors
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Network failure, timeout, or client construction failure
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("Webhook returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// A single embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub color: u32,
    /// RFC 3339 UTC timestamp with a `Z` suffix
    pub timestamp: String,
}

impl Embed {
    /// Create an untitled embed stamped with the current time
    pub fn new(description: impl Into<String>, color: u32) -> Self {
        Self {
            title: None,
            description: description.into(),
            color,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Request body for the webhook endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

impl From<Embed> for WebhookPayload {
    fn from(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
        }
    }
}

/// HTTP client bound to one webhook URL
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// Build a client whose requests give up after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// POST the payload as JSON
    ///
    /// Any 2xx status is success (Discord answers 204 No Content).
    pub async fn send(&self, payload: &WebhookPayload) -> Result<(), WebhookError> {
        let response = self.http.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status { status, body });
        }

        tracing::debug!(status = %status, "Webhook delivered");
        Ok(())
    }
}
