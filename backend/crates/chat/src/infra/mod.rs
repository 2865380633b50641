//! Infrastructure Layer
//!
//! Implementations of domain traits backed by external services.

pub mod discord;
