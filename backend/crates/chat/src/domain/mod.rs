//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (ChatMessage, PresenceEntry)
//! - In-process state owners (MessageLog, PresenceTracker)
//! - The outbound notification seam (ChatNotifier)

pub mod entities;
pub mod message_log;
pub mod notifier;
pub mod presence;
