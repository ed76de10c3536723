//! Chat conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub(crate) mod replies;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, InlineButton, InlineKeyboard, Keyboard};
pub use event::{ButtonAction, Command, Event, ListView, MenuAction, Origin};
pub use state::{ChatContext, ChatId, ChatState};
pub use transition::transition;
