//! Notifier Trait
//!
//! Outbound mirror of chat messages. Implementation is in infrastructure layer.

use crate::domain::entities::ChatMessage;
use crate::error::ChatResult;

/// Receives a copy of every message that enters the log
#[trait_variant::make(ChatNotifier: Send)]
pub trait LocalChatNotifier {
    /// Deliver one message. Failures are reported, never retried here.
    async fn notify(&self, message: &ChatMessage) -> ChatResult<()>;
}
