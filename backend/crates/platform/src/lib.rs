//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256 digests)
//! - Client identification (address extraction, header fingerprints)
//! - Outbound webhook delivery (Discord-style embeds)

pub mod client;
pub mod crypto;
pub mod webhook;
