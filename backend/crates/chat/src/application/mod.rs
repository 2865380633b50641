//! Application Layer - Use Cases
//!
//! This layer orchestrates domain state and the outbound notifier.
//! Contains use case implementations and the clearing cycle.

pub mod clearing_cycle;
pub mod config;
pub mod count_online;
pub mod inspect_presence;
pub mod mirror;
pub mod poll_messages;
pub mod post_message;
pub mod reset_history;

pub use clearing_cycle::ClearingCycle;
pub use count_online::CountOnlineUseCase;
pub use inspect_presence::{InspectPresenceUseCase, PresenceReport};
pub use mirror::MirrorQueue;
pub use poll_messages::PollMessagesUseCase;
pub use post_message::{PostMessageInput, PostMessageUseCase};
pub use reset_history::ResetHistoryUseCase;
