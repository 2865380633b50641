//! Count Online Use Case

use crate::domain::presence::PresenceTracker;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Count Online Use Case
pub struct CountOnlineUseCase {
    presence: Arc<PresenceTracker>,
}

impl CountOnlineUseCase {
    pub fn new(presence: Arc<PresenceTracker>) -> Self {
        Self { presence }
    }

    pub async fn execute(&self, now: DateTime<Utc>) -> usize {
        self.presence.count_active(now).await
    }
}
