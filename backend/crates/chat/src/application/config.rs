//! Application Configuration
//!
//! Configuration for the chat application layer, read from environment
//! variables.

use std::str::FromStr;
use std::time::Duration;

use crate::application::mirror::DEFAULT_MIRROR_CAPACITY;
use crate::domain::presence::DEFAULT_PRESENCE_TTL;

/// Embed colour used for every mirrored message
pub const DEFAULT_EMBED_COLOR: u32 = 5814783;

/// Notice appended by every scheduled clear
pub const CLEAR_NOTICE: &str = "Chat history cleared.";

/// Banner text announced at startup
pub const STARTUP_BANNER: &str =
    "Server has been started/restarted. All previous messages have been cleared.";

/// Chat application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Webhook sink URL; `None` disables mirroring
    pub webhook_url: Option<String>,
    /// Per-request webhook timeout
    pub webhook_timeout: Duration,
    /// Embed colour
    pub embed_color: u32,
    /// Messages that may wait for webhook delivery before new posts are
    /// no longer mirrored
    pub mirror_capacity: usize,
    /// Period of the clearing cycle
    pub clear_interval: Duration,
    /// Presence staleness threshold
    pub presence_ttl: Duration,
    /// Optional bound on retained history
    pub max_history: Option<usize>,
    /// Take the client address from X-Forwarded-For
    pub trust_forwarded_for: bool,
    /// Expose GET /debug/fp
    pub debug_endpoint: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_timeout: Duration::from_secs(10),
            embed_color: DEFAULT_EMBED_COLOR,
            mirror_capacity: DEFAULT_MIRROR_CAPACITY,
            clear_interval: Duration::from_secs(3600),
            presence_ttl: DEFAULT_PRESENCE_TTL,
            max_history: None,
            trust_forwarded_for: false,
            debug_endpoint: true,
        }
    }
}

impl ChatConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// Unparseable values keep their default and are logged; they never
    /// abort startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let webhook_url = lookup("DISCORD_WEBHOOK_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Self {
            webhook_url,
            webhook_timeout: parse_secs(&lookup, "CHAT_WEBHOOK_TIMEOUT_SECS")
                .unwrap_or(defaults.webhook_timeout),
            embed_color: defaults.embed_color,
            mirror_capacity: parse_var::<usize, _>(&lookup, "CHAT_MIRROR_QUEUE_CAPACITY")
                .filter(|&n| n > 0)
                .unwrap_or(defaults.mirror_capacity),
            clear_interval: parse_secs(&lookup, "CHAT_CLEAR_INTERVAL_SECS")
                .unwrap_or(defaults.clear_interval),
            presence_ttl: parse_secs(&lookup, "CHAT_PRESENCE_TTL_SECS")
                .unwrap_or(defaults.presence_ttl),
            max_history: parse_var::<usize, _>(&lookup, "CHAT_MAX_HISTORY")
                .filter(|&n| n > 0),
            trust_forwarded_for: parse_var(&lookup, "CHAT_TRUST_FORWARDED_FOR")
                .unwrap_or(defaults.trust_forwarded_for),
            debug_endpoint: parse_var(&lookup, "CHAT_DEBUG_ENDPOINT")
                .unwrap_or(defaults.debug_endpoint),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %trimmed, "Ignoring unparseable config value");
            None
        }
    }
}

/// Positive whole seconds; zero is treated as unset
fn parse_secs<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<u64, _>(lookup, key) {
        Some(0) => {
            tracing::warn!(key, "Ignoring zero duration");
            None
        }
        other => other.map(Duration::from_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();

        assert_eq!(config.webhook_url, None);
        assert_eq!(config.clear_interval, Duration::from_secs(3600));
        assert_eq!(config.presence_ttl, Duration::from_secs(60));
        assert_eq!(config.embed_color, 5814783);
        assert_eq!(config.mirror_capacity, 256);
        assert_eq!(config.max_history, None);
        assert!(!config.trust_forwarded_for);
        assert!(config.debug_endpoint);
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = ChatConfig::from_lookup(|_| None);
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ChatConfig::from_lookup(lookup_from(&[
            ("DISCORD_WEBHOOK_URL", " https://discord.example/api/webhooks/1/abc "),
            ("CHAT_WEBHOOK_TIMEOUT_SECS", "3"),
            ("CHAT_CLEAR_INTERVAL_SECS", "120"),
            ("CHAT_PRESENCE_TTL_SECS", "30"),
            ("CHAT_MAX_HISTORY", "500"),
            ("CHAT_TRUST_FORWARDED_FOR", "true"),
            ("CHAT_DEBUG_ENDPOINT", "false"),
            ("CHAT_MIRROR_QUEUE_CAPACITY", "16"),
        ]));

        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://discord.example/api/webhooks/1/abc")
        );
        assert_eq!(config.webhook_timeout, Duration::from_secs(3));
        assert_eq!(config.clear_interval, Duration::from_secs(120));
        assert_eq!(config.presence_ttl, Duration::from_secs(30));
        assert_eq!(config.max_history, Some(500));
        assert!(config.trust_forwarded_for);
        assert!(!config.debug_endpoint);
        assert_eq!(config.mirror_capacity, 16);
    }

    #[test]
    fn test_blank_webhook_url_disables_webhook() {
        let config = ChatConfig::from_lookup(lookup_from(&[("DISCORD_WEBHOOK_URL", "   ")]));
        assert_eq!(config.webhook_url, None);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = ChatConfig::from_lookup(lookup_from(&[
            ("CHAT_CLEAR_INTERVAL_SECS", "hourly"),
            ("CHAT_PRESENCE_TTL_SECS", "0"),
            ("CHAT_MAX_HISTORY", "0"),
            ("CHAT_TRUST_FORWARDED_FOR", "yes"),
            ("CHAT_MIRROR_QUEUE_CAPACITY", "0"),
        ]));

        assert_eq!(config.clear_interval, Duration::from_secs(3600));
        assert_eq!(config.presence_ttl, Duration::from_secs(60));
        assert_eq!(config.max_history, None);
        assert!(!config.trust_forwarded_for);
        assert_eq!(config.mirror_capacity, 256);
    }
}
