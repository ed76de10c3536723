//! Chat state types

/// Telegram chat identifier
pub type ChatId = i64;

/// What the bot expects next from a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChatState {
    /// Waiting for a menu selection
    #[default]
    Idle,
    /// Next free text is a comma-separated list for the fridge
    AwaitingFridgeAdd,
    /// Next free text is a comma-separated list for the shopping list
    AwaitingShoppingAdd,
    /// Next free text names one bought item
    AwaitingBoughtName,
    /// Next free text names one item to delete. No menu entry leads here;
    /// deletion goes through the button picker.
    AwaitingRemoveName,
}

impl ChatState {
    /// Whether free text will be consumed as input
    pub fn is_awaiting_input(self) -> bool {
        !matches!(self, ChatState::Idle)
    }
}

/// Per-event context, fixed for the lifetime of one inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub chat_id: ChatId,
    /// Whether the chat is on the allow-list
    pub authorized: bool,
}

impl ChatContext {
    pub fn new(chat_id: ChatId, authorized: bool) -> Self {
        Self {
            chat_id,
            authorized,
        }
    }
}
