//! Inspect Presence Use Case
//!
//! Diagnostic view: the caller's own fingerprint plus the raw presence map.

use crate::domain::entities::PresenceEntry;
use crate::domain::presence::PresenceTracker;
use platform::client::ClientFingerprint;
use std::sync::Arc;

/// Output DTO for presence inspection
#[derive(Debug, Clone)]
pub struct PresenceReport {
    pub fingerprint: String,
    pub entries: Vec<PresenceEntry>,
}

/// Inspect Presence Use Case
pub struct InspectPresenceUseCase {
    presence: Arc<PresenceTracker>,
}

impl InspectPresenceUseCase {
    pub fn new(presence: Arc<PresenceTracker>) -> Self {
        Self { presence }
    }

    /// Does not prune; stale entries are shown until the next count.
    pub async fn execute(&self, fingerprint: ClientFingerprint) -> PresenceReport {
        PresenceReport {
            fingerprint: fingerprint.digest,
            entries: self.presence.entries().await,
        }
    }
}
