//! Message Log
//!
//! The ordered, append-only chat history. All writers go through the
//! write lock, so a snapshot never observes a clear interleaved with an
//! in-flight append.

use crate::domain::entities::ChatMessage;
use tokio::sync::RwLock;

/// Append-only message history with a full-clear operation
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: RwLock<Vec<ChatMessage>>,
    /// Deployment bound; oldest messages are dropped first
    max_len: Option<usize>,
}

impl MessageLog {
    /// Unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that keeps at most `max_len` messages (`None` = unbounded)
    pub fn with_max_len(max_len: Option<usize>) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            max_len: max_len.filter(|&n| n > 0),
        }
    }

    pub async fn append(&self, message: ChatMessage) {
        self.append_then(message, |_| ()).await;
    }

    /// Append, then run `then` on the new message before the write lock is
    /// released. Writers are serialized, so `then` observes log order.
    pub async fn append_then<F, R>(&self, message: ChatMessage, then: F) -> R
    where
        F: FnOnce(&ChatMessage) -> R,
    {
        let mut messages = self.messages.write().await;
        let out = then(&message);
        messages.push(message);
        if let Some(max_len) = self.max_len {
            if messages.len() > max_len {
                let excess = messages.len() - max_len;
                messages.drain(..excess);
            }
        }
        out
    }

    /// Full history in append order
    pub async fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Replace the whole history with exactly `notice`
    pub async fn clear(&self, notice: ChatMessage) {
        self.clear_then(notice, |_| ()).await;
    }

    /// Clear, running `then` on the notice under the same write lock
    pub async fn clear_then<F, R>(&self, notice: ChatMessage, then: F) -> R
    where
        F: FnOnce(&ChatMessage) -> R,
    {
        let mut messages = self.messages.write().await;
        let out = then(&notice);
        *messages = vec![notice];
        out
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_append_preserves_order() {
        let log = MessageLog::new();
        for i in 0..10 {
            log.append(ChatMessage::new(format!("user{i}"), format!("msg{i}")))
                .await;
        }

        let snapshot = log.snapshot().await;
        assert_eq!(snapshot.len(), 10);
        for (i, msg) in snapshot.iter().enumerate() {
            assert_eq!(msg.username, format!("user{i}"));
            assert_eq!(msg.message, format!("msg{i}"));
        }
    }

    #[tokio::test]
    async fn test_clear_replaces_wholesale() {
        let log = MessageLog::new();
        log.append(ChatMessage::new("alice", "one")).await;
        log.append(ChatMessage::new("bob", "two")).await;

        let first = ChatMessage::system("Chat history cleared.");
        log.clear(first.clone()).await;
        assert_eq!(log.snapshot().await, vec![first]);

        let second = ChatMessage::banner("restarted");
        log.clear(second.clone()).await;
        assert_eq!(log.snapshot().await, vec![second]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_append_then_runs_in_log_order() {
        let log = Arc::new(MessageLog::new());
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let log = log.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    log.append_then(ChatMessage::new("u", format!("{i}")), |m| {
                        seen.lock().unwrap().push(m.clone());
                    })
                    .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let seen = seen.lock().unwrap().clone();
        assert_eq!(log.snapshot().await, seen);
    }

    #[tokio::test]
    async fn test_new_log_is_empty() {
        let log = MessageLog::new();
        assert!(log.is_empty().await);
        assert!(log.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_bounded_log_drops_oldest() {
        let log = MessageLog::with_max_len(Some(3));
        for i in 0..5 {
            log.append(ChatMessage::new("u", format!("{i}"))).await;
        }

        let bodies: Vec<String> = log
            .snapshot()
            .await
            .into_iter()
            .map(|m| m.message)
            .collect();
        assert_eq!(bodies, vec!["2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_zero_bound_means_unbounded() {
        let log = MessageLog::with_max_len(Some(0));
        log.append(ChatMessage::new("u", "a")).await;
        log.append(ChatMessage::new("u", "b")).await;
        assert_eq!(log.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let log = Arc::new(MessageLog::new());
        let n = 200;

        let handles: Vec<_> = (0..n)
            .map(|i| {
                let log = log.clone();
                tokio::spawn(async move {
                    log.append(ChatMessage::new("writer", format!("{i}"))).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = log.snapshot().await;
        assert_eq!(snapshot.len(), n);
        let mut seen: Vec<usize> = snapshot
            .iter()
            .map(|m| m.message.parse().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }
}
