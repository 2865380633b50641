//! Poll Messages Use Case

use crate::domain::entities::ChatMessage;
use crate::domain::message_log::MessageLog;
use crate::domain::presence::PresenceTracker;
use chrono::{DateTime, Utc};
use platform::client::ClientFingerprint;
use std::sync::Arc;

/// Poll Messages Use Case
pub struct PollMessagesUseCase {
    log: Arc<MessageLog>,
    presence: Arc<PresenceTracker>,
}

impl PollMessagesUseCase {
    pub fn new(log: Arc<MessageLog>, presence: Arc<PresenceTracker>) -> Self {
        Self { log, presence }
    }

    /// Return the history; pollers that declare a fingerprint token are
    /// recorded as present.
    pub async fn execute(
        &self,
        fingerprint: &ClientFingerprint,
        now: DateTime<Utc>,
    ) -> Vec<ChatMessage> {
        if fingerprint.token_supplied {
            self.presence
                .touch(&fingerprint.digest, &fingerprint.address, now)
                .await;
        }

        self.log.snapshot().await
    }
}
