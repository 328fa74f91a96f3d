//! # peer_core
//!
//! Core domain logic for Peer: the rule-based reply generator, chat models and
//! the document store the chat flow persists into.

pub mod conversations;
pub mod hello;
pub mod migrate;
pub mod models;
pub mod reply;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
