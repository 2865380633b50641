//! Post Message Use Case

use crate::application::mirror::MirrorQueue;
use crate::domain::entities::ChatMessage;
use crate::domain::message_log::MessageLog;
use std::sync::Arc;

/// Input DTO for post message; missing fields take their defaults
#[derive(Debug, Clone, Default)]
pub struct PostMessageInput {
    pub username: Option<String>,
    pub message: Option<String>,
}

/// Post Message Use Case
pub struct PostMessageUseCase {
    log: Arc<MessageLog>,
    mirror: MirrorQueue,
}

impl PostMessageUseCase {
    pub fn new(log: Arc<MessageLog>, mirror: MirrorQueue) -> Self {
        Self { log, mirror }
    }

    /// Append the message and queue it for mirroring without waiting for
    /// delivery. A full mirror queue never rejects the post.
    pub async fn execute(&self, input: PostMessageInput) -> ChatMessage {
        let message = ChatMessage::with_defaults(input.username, input.message);

        self.log
            .append_then(message.clone(), |m| self.mirror.try_enqueue(m.clone()))
            .await;

        tracing::info!(
            username = %message.username,
            length = message.message.len(),
            "Message received"
        );

        message
    }
}
