//! Reset History Use Case
//!
//! Replaces the whole log with a single system notice and mirrors it.
//! Used for the startup banner and for every scheduled clear.

use crate::application::mirror::MirrorQueue;
use crate::domain::entities::ChatMessage;
use crate::domain::message_log::MessageLog;
use std::sync::Arc;

/// Reset History Use Case
pub struct ResetHistoryUseCase {
    log: Arc<MessageLog>,
    mirror: MirrorQueue,
}

impl ResetHistoryUseCase {
    pub fn new(log: Arc<MessageLog>, mirror: MirrorQueue) -> Self {
        Self { log, mirror }
    }

    /// Clear the log down to `notice` and queue the notice behind every
    /// message already waiting for the sink.
    ///
    /// Waits for queue space first, so notices are never dropped while the
    /// worker is alive. The delivery itself is not awaited.
    pub async fn execute(&self, notice: ChatMessage) {
        let slot = self.mirror.reserve().await;
        if slot.is_none() {
            tracing::warn!("Mirror worker stopped, notice not mirrored");
        }

        self.log
            .clear_then(notice.clone(), |n| {
                if let Some(slot) = slot {
                    slot.send(n.clone());
                }
            })
            .await;

        tracing::info!(notice = %notice.message, "Chat history reset");
    }
}
