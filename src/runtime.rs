//! Runtime for executing chat interactions
//!
//! Owns the per-chat state map, runs effects against the item store and the
//! chat transport, and feeds store outcomes back into the state machine.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::*;

use crate::db::Database;
use crate::state_machine::{ChatId, Event};
use crate::telegram::TelegramClient;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = ChatRuntime<Database, TelegramClient>;

/// An event from the chat transport, tagged with the chat it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat_id: ChatId,
    pub event: Event,
}
