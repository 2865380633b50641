//! Chat Relay Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the message log, the presence tracker, notifier trait
//! - `application/` - Use cases and the background clearing cycle
//! - `infra/` - Discord webhook notifier
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Model
//! - History lives in memory only; it is reset at startup and on a timer
//! - Presence is estimated from header fingerprints, pruned lazily on read
//! - Every message is mirrored to the webhook sink in log order through one
//!   bounded queue; posting never waits for delivery

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ChatConfig;
pub use application::{ClearingCycle, ResetHistoryUseCase};
pub use domain::entities::ChatMessage;
pub use error::{ChatError, ChatResult};
pub use infra::discord::DiscordNotifier;
pub use presentation::handlers::ChatAppState;
pub use presentation::router::chat_router;
