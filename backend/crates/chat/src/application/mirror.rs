//! Webhook mirroring
//!
//! Every mirrored message goes through one bounded queue drained by a
//! single worker, so the sink sees messages in log order and at most one
//! delivery is in flight. Delivery failures end here: they are logged and
//! never propagated.

use crate::domain::entities::ChatMessage;
use crate::domain::notifier::ChatNotifier;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Permit, error::TrySendError};
use tokio::task::JoinHandle;

/// Default number of messages that may wait for delivery
pub const DEFAULT_MIRROR_CAPACITY: usize = 256;

/// Deliver `message` and absorb any failure. Returns whether it was delivered.
pub async fn mirror<N>(notifier: &N, message: &ChatMessage) -> bool
where
    N: ChatNotifier + Sync,
{
    match notifier.notify(message).await {
        Ok(()) => true,
        Err(e) => {
            e.log();
            false
        }
    }
}

/// Sending half of the mirror queue
#[derive(Debug, Clone)]
pub struct MirrorQueue {
    tx: mpsc::Sender<ChatMessage>,
}

impl MirrorQueue {
    /// Start the delivery worker
    ///
    /// The worker exits once every `MirrorQueue` clone is dropped and the
    /// queue has been drained.
    pub fn spawn<N>(notifier: Arc<N>, capacity: usize) -> (Self, JoinHandle<()>)
    where
        N: ChatNotifier + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(notifier, rx));
        (Self { tx }, worker)
    }

    /// Queue `message` without waiting; a full queue drops it
    pub fn try_enqueue(&self, message: ChatMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                tracing::warn!(
                    username = %message.username,
                    "Mirror queue full, message not mirrored"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("Mirror worker stopped, message not mirrored");
                false
            }
        }
    }

    /// Wait for a free slot; `None` once the worker has stopped
    pub async fn reserve(&self) -> Option<Permit<'_, ChatMessage>> {
        self.tx.reserve().await.ok()
    }
}

async fn run_worker<N>(notifier: Arc<N>, mut rx: mpsc::Receiver<ChatMessage>)
where
    N: ChatNotifier + Send + Sync + 'static,
{
    while let Some(message) = rx.recv().await {
        mirror(notifier.as_ref(), &message).await;
    }
    tracing::debug!("Mirror queue drained");
}
