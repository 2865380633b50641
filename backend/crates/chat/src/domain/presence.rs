//! Presence Tracker
//!
//! Recently-seen fingerprints. There is no sweep task: stale entries are
//! pruned lazily whenever the active count is read.

use crate::domain::entities::PresenceEntry;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default staleness threshold
pub const DEFAULT_PRESENCE_TTL: Duration = Duration::from_secs(60);

/// Fingerprint-keyed presence map with lazy expiry
#[derive(Debug)]
pub struct PresenceTracker {
    entries: Mutex<HashMap<String, PresenceEntry>>,
    ttl: TimeDelta,
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_PRESENCE_TTL)
    }
}

impl PresenceTracker {
    /// An entry is stale once `now - last_seen_at >= ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Insert or refresh the entry for `fingerprint`
    pub async fn touch(&self, fingerprint: &str, source_address: &str, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            fingerprint.to_string(),
            PresenceEntry {
                fingerprint: fingerprint.to_string(),
                last_seen_at: now,
                source_address: source_address.to_string(),
            },
        );
    }

    /// Count entries seen within the TTL, dropping the rest
    ///
    /// Uniqueness comes from the map key alone.
    pub async fn count_active(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| now - entry.last_seen_at < self.ttl);

        let pruned = before - entries.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = entries.len(), "Pruned stale presence entries");
        }
        entries.len()
    }

    /// Copy of every tracked entry, stale or not, ordered by fingerprint
    pub async fn entries(&self) -> Vec<PresenceEntry> {
        let entries = self.entries.lock().await;
        let mut list: Vec<PresenceEntry> = entries.values().cloned().collect();
        list.sort_by(|a, b| a.fingerprint.cmp(&b.fingerprint));
        list
    }
}
