//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the runtime with mock implementations.

use crate::db::{Database, DbError};
use crate::state_machine::{ChatId, InlineKeyboard, Keyboard};
use crate::telegram::TelegramError;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for grocery items
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert an item; `false` if the name already exists
    async fn add(&self, name: &str, to_fridge: bool) -> Result<bool, DbError>;

    /// Delete an item; `false` if it did not exist
    async fn remove(&self, name: &str) -> Result<bool, DbError>;

    async fn list_fridge(&self) -> Result<Vec<String>, DbError>;

    async fn list_shopping(&self) -> Result<Vec<String>, DbError>;

    /// Move a shopping item into the fridge; `false` unless it was on the list
    async fn mark_bought(&self, name: &str) -> Result<bool, DbError>;
}

/// Outbound half of the chat transport
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TelegramError>;

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: i64,
        text: &str,
        buttons: Option<&InlineKeyboard>,
    ) -> Result<(), TelegramError>;

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ItemStore + ?Sized> ItemStore for Arc<T> {
    async fn add(&self, name: &str, to_fridge: bool) -> Result<bool, DbError> {
        (**self).add(name, to_fridge).await
    }

    async fn remove(&self, name: &str) -> Result<bool, DbError> {
        (**self).remove(name).await
    }

    async fn list_fridge(&self) -> Result<Vec<String>, DbError> {
        (**self).list_fridge().await
    }

    async fn list_shopping(&self) -> Result<Vec<String>, DbError> {
        (**self).list_shopping().await
    }

    async fn mark_bought(&self, name: &str) -> Result<bool, DbError> {
        (**self).mark_bought(name).await
    }
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TelegramError> {
        (**self).send_message(chat_id, text, keyboard).await
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: i64,
        text: &str,
        buttons: Option<&InlineKeyboard>,
    ) -> Result<(), TelegramError> {
        (**self).edit_message(chat_id, message_id, text, buttons).await
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        (**self).answer_callback(callback_id, text).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// SQLite statements on this table finish in microseconds, so they run
/// inline on the runtime thread.
#[async_trait]
impl ItemStore for Database {
    async fn add(&self, name: &str, to_fridge: bool) -> Result<bool, DbError> {
        self.add_item(name, to_fridge)
    }

    async fn remove(&self, name: &str) -> Result<bool, DbError> {
        self.remove_item(name)
    }

    async fn list_fridge(&self) -> Result<Vec<String>, DbError> {
        Database::list_fridge(self)
    }

    async fn list_shopping(&self) -> Result<Vec<String>, DbError> {
        Database::list_shopping(self)
    }

    async fn mark_bought(&self, name: &str) -> Result<bool, DbError> {
        Database::mark_bought(self, name)
    }
}
