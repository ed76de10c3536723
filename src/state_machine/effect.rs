//! Effects produced by state transitions

use super::event::{ButtonAction, ListView, Origin};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    // Chat transport
    /// Send a new message to the chat
    SendMessage {
        text: String,
        keyboard: Option<Keyboard>,
    },

    /// Replace the text (and inline buttons) of an earlier message
    EditMessage {
        message_id: i64,
        text: String,
        buttons: Option<InlineKeyboard>,
    },

    /// Acknowledge a button tap with a transient notification
    AnswerCallback {
        callback_id: String,
        text: Option<String>,
    },

    // Item store
    /// Add each name in order; yields `Event::ItemsAdded`
    AddItems { names: Vec<String>, to_fridge: bool },

    /// Read one of the lists; yields `Event::ItemsListed`
    ListItems { view: ListView },

    /// Yields `Event::BoughtMarked`
    MarkBought { name: String, origin: Origin },

    /// Yields `Event::ItemRemoved`
    RemoveItem { name: String, origin: Origin },
}

impl Effect {
    pub fn send(text: impl Into<String>) -> Self {
        Effect::SendMessage {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn send_with(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Effect::SendMessage {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn edit(message_id: i64, text: impl Into<String>) -> Self {
        Effect::EditMessage {
            message_id,
            text: text.into(),
            buttons: None,
        }
    }

    pub fn answer(callback_id: impl Into<String>, text: impl Into<String>) -> Self {
        Effect::AnswerCallback {
            callback_id: callback_id.into(),
            text: Some(text.into()),
        }
    }

    pub fn acknowledge(callback_id: impl Into<String>) -> Self {
        Effect::AnswerCallback {
            callback_id: callback_id.into(),
            text: None,
        }
    }

    /// Whether executing this effect touches the item store
    #[allow(dead_code)] // Used in tests
    pub fn is_store_effect(&self) -> bool {
        matches!(
            self,
            Effect::AddItems { .. }
                | Effect::ListItems { .. }
                | Effect::MarkBought { .. }
                | Effect::RemoveItem { .. }
        )
    }
}

/// Rows of inline buttons attached to one message
pub type InlineKeyboard = Vec<Vec<InlineButton>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub action: ButtonAction,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

/// Keyboard attached to a sent message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// The persistent main menu
    Menu,
    Inline(InlineKeyboard),
}
