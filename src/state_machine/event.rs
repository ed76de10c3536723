//! Events that can occur in a chat

use std::fmt;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Inbound events from the chat transport
    Command {
        command: Command,
        /// Sender's first name, when the transport knows it
        display_name: Option<String>,
    },
    Text {
        text: String,
    },
    ButtonTap {
        callback_id: String,
        message_id: i64,
        payload: String,
    },

    // Outcomes of store effects
    ItemsAdded {
        added: Vec<String>,
        existed: Vec<String>,
    },
    ItemsListed {
        view: ListView,
        items: Vec<String>,
    },
    BoughtMarked {
        name: String,
        origin: Origin,
        success: bool,
    },
    ItemRemoved {
        name: String,
        origin: Origin,
        success: bool,
    },
    StorageFailed {
        origin: Origin,
    },
}

/// Slash commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    MyId,
}

impl Command {
    /// Parse `/start`, `/myid` and their `@botname` forms.
    /// Anything else is not a command and is handled as free text.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);
        match name {
            "start" => Some(Command::Start),
            "myid" => Some(Command::MyId),
            _ => None,
        }
    }
}

/// Entries of the persistent reply-keyboard menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    AddToFridge,
    AddToShopping,
    ShowFridge,
    ShowShopping,
    MarkBought,
    Delete,
}

impl MenuAction {
    /// Menu layout, row by row
    pub const ROWS: [[MenuAction; 2]; 3] = [
        [MenuAction::AddToFridge, MenuAction::AddToShopping],
        [MenuAction::ShowFridge, MenuAction::ShowShopping],
        [MenuAction::MarkBought, MenuAction::Delete],
    ];

    /// The exact text the client sends when the entry is pressed
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::AddToFridge => "➕ В холодильник",
            MenuAction::AddToShopping => "🛒 В список покупок",
            MenuAction::ShowFridge => "📋 Показать холодильник",
            MenuAction::ShowShopping => "🛍 Показать покупки",
            MenuAction::MarkBought => "✅ Куплено",
            MenuAction::Delete => "❌ Удалить",
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        Self::ROWS
            .iter()
            .flatten()
            .copied()
            .find(|action| action.label() == text)
    }
}

/// Actions carried by inline buttons as `<action>:<name>` payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Shopping card: move the item into the fridge
    Buy(String),
    /// Shopping card: delete the item
    Delete(String),
    /// Fridge delete picker: delete the item and refresh the picker
    DeleteFridge(String),
}

impl ButtonAction {
    pub fn parse(payload: &str) -> Option<Self> {
        let (action, name) = payload.split_once(':')?;
        let name = name.to_string();
        match action {
            "buy" => Some(ButtonAction::Buy(name)),
            "delete" => Some(ButtonAction::Delete(name)),
            "delete_fridge" => Some(ButtonAction::DeleteFridge(name)),
            _ => None,
        }
    }
}

impl fmt::Display for ButtonAction {
    /// Renders the callback payload
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Buy(name) => write!(f, "buy:{name}"),
            ButtonAction::Delete(name) => write!(f, "delete:{name}"),
            ButtonAction::DeleteFridge(name) => write!(f, "delete_fridge:{name}"),
        }
    }
}

/// Which interaction started a store effect; decides how its outcome is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Free text typed by the user; answered with a new message
    Text,
    /// A button on a shopping-list card
    ShoppingCard { callback_id: String, message_id: i64 },
    /// A button on the fridge delete picker
    FridgePicker { callback_id: String, message_id: i64 },
}

impl Origin {
    pub fn callback_id(&self) -> Option<&str> {
        match self {
            Origin::Text => None,
            Origin::ShoppingCard { callback_id, .. } | Origin::FridgePicker { callback_id, .. } => {
                Some(callback_id)
            }
        }
    }
}

/// How a listing is presented once the store returns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Bulleted fridge contents in one message
    FridgeSummary,
    /// One message with buy/delete buttons per shopping item
    ShoppingCards,
    /// Fresh delete picker for fridge items
    DeletePicker,
    /// Redraw an existing delete picker in place
    RefreshPicker { message_id: i64 },
}
