//! Domain Entities
//!
//! Core value types for the chat domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Username applied when a post omits one
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Author of system notices
pub const SYSTEM_USERNAME: &str = "System";

const BANNER_PREFIX: &str = "::banner{";
const BANNER_SUFFIX: &str = "}";

/// A chat message. Immutable once appended; identified only by its
/// position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
}

impl ChatMessage {
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
        }
    }

    /// Build a message from optional fields, applying the defaults
    /// (`"Anonymous"` and the empty string).
    pub fn with_defaults(username: Option<String>, message: Option<String>) -> Self {
        Self {
            username: username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            message: message.unwrap_or_default(),
        }
    }

    /// A plain system notice
    pub fn system(message: impl Into<String>) -> Self {
        Self::new(SYSTEM_USERNAME, message)
    }

    /// A system notice carrying the banner render hint (`::banner{...}`)
    pub fn banner(text: &str) -> Self {
        Self::system(format!("{BANNER_PREFIX}{text}{BANNER_SUFFIX}"))
    }

    /// The unwrapped text when the body uses banner markup
    ///
    /// Only the outer markers are stripped; braces inside the text are kept.
    pub fn banner_text(&self) -> Option<&str> {
        self.message
            .strip_prefix(BANNER_PREFIX)
            .and_then(|rest| rest.strip_suffix(BANNER_SUFFIX))
    }
}

/// Last sighting of a fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceEntry {
    pub fingerprint: String,
    pub last_seen_at: DateTime<Utc>,
    pub source_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults() {
        let msg = ChatMessage::with_defaults(None, None);
        assert_eq!(msg.username, "Anonymous");
        assert_eq!(msg.message, "");

        let msg = ChatMessage::with_defaults(Some("alice".into()), Some("hi".into()));
        assert_eq!(msg, ChatMessage::new("alice", "hi"));
    }

    #[test]
    fn test_banner_roundtrip() {
        let banner = ChatMessage::banner("Server restarted");
        assert_eq!(banner.username, "System");
        assert_eq!(banner.message, "::banner{Server restarted}");
        assert_eq!(banner.banner_text(), Some("Server restarted"));
    }

    #[test]
    fn test_banner_text_keeps_inner_braces() {
        let msg = ChatMessage::new("eve", "::banner{a {nested} b}");
        assert_eq!(msg.banner_text(), Some("a {nested} b"));
    }

    #[test]
    fn test_banner_text_requires_both_markers() {
        assert_eq!(ChatMessage::new("x", "::banner{open").banner_text(), None);
        assert_eq!(ChatMessage::new("x", "text}").banner_text(), None);
        assert_eq!(ChatMessage::system("Chat history cleared.").banner_text(), None);
    }

    #[test]
    fn test_serializes_as_username_message_object() {
        let json = serde_json::to_value(ChatMessage::new("alice", "hi")).unwrap();
        assert_eq!(json, serde_json::json!({"username": "alice", "message": "hi"}));
    }
}
