//! Domain models persisted in the document store.

pub mod chat;

pub use chat::{Conversation, Message, Role};
