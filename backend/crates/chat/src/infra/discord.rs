//! Discord Webhook Notifier

use crate::application::config::ChatConfig;
use crate::domain::entities::ChatMessage;
use crate::domain::notifier::ChatNotifier;
use crate::error::ChatResult;
use platform::webhook::{Embed, WebhookClient, WebhookPayload};

/// Mirrors chat messages to a Discord webhook as embeds
///
/// Without a configured URL every notify is a successful no-op.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: Option<WebhookClient>,
    color: u32,
}

impl DiscordNotifier {
    pub fn new(client: WebhookClient, color: u32) -> Self {
        Self {
            client: Some(client),
            color,
        }
    }

    /// Notifier that drops every message
    pub fn disabled() -> Self {
        Self {
            client: None,
            color: 0,
        }
    }

    /// Build from configuration; an absent URL yields a disabled notifier
    pub fn from_config(config: &ChatConfig) -> ChatResult<Self> {
        match &config.webhook_url {
            Some(url) => {
                let client = WebhookClient::new(url.clone(), config.webhook_timeout)?;
                Ok(Self::new(client, config.embed_color))
            }
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Banner messages are unwrapped and sent untitled; everything else is
    /// titled with the username.
    pub fn payload_for(&self, message: &ChatMessage) -> WebhookPayload {
        let embed = match message.banner_text() {
            Some(text) => Embed::new(text, self.color),
            None => Embed::new(message.message.clone(), self.color)
                .with_title(message.username.clone()),
        };
        WebhookPayload::from(embed)
    }
}

impl ChatNotifier for DiscordNotifier {
    async fn notify(&self, message: &ChatMessage) -> ChatResult<()> {
        let Some(client) = &self.client else {
            tracing::debug!("Webhook disabled, skipping mirror");
            return Ok(());
        };

        client.send(&self.payload_for(message)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn notifier() -> DiscordNotifier {
        let client = WebhookClient::new("http://127.0.0.1:9/hook", Duration::from_secs(1)).unwrap();
        DiscordNotifier::new(client, 5814783)
    }

    #[test]
    fn test_regular_message_is_titled_with_username() {
        let payload = notifier().payload_for(&ChatMessage::new("alice", "hi"));
        assert_eq!(payload.embeds.len(), 1);
        let embed = &payload.embeds[0];
        assert_eq!(embed.title.as_deref(), Some("alice"));
        assert_eq!(embed.description, "hi");
        assert_eq!(embed.color, 5814783);
    }

    #[test]
    fn test_banner_is_unwrapped_without_title() {
        let payload = notifier().payload_for(&ChatMessage::banner("Server restarted"));
        let embed = &payload.embeds[0];
        assert_eq!(embed.title, None);
        assert_eq!(embed.description, "Server restarted");
    }

    #[test]
    fn test_from_config_without_url_is_disabled() {
        let notifier = DiscordNotifier::from_config(&ChatConfig::default()).unwrap();
        assert!(!notifier.is_enabled());
    }

    #[test]
    fn test_from_config_with_url_is_enabled() {
        let config = ChatConfig {
            webhook_url: Some("https://discord.example/api/webhooks/1/t".to_string()),
            ..ChatConfig::default()
        };
        let notifier = DiscordNotifier::from_config(&config).unwrap();
        assert!(notifier.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_notifier_succeeds() {
        let result = DiscordNotifier::disabled()
            .notify(&ChatMessage::new("bob", "hello"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_sink_reports_webhook_error() {
        let result = notifier().notify(&ChatMessage::new("bob", "hello")).await;
        assert!(matches!(result, Err(crate::error::ChatError::Webhook(_))));
    }
}
