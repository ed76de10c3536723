//! Mock implementations for testing
//!
//! These mocks enable runtime tests without a network or a disk.

use super::traits::{ChatTransport, ItemStore};
use crate::db::DbError;
use crate::state_machine::{ChatId, InlineKeyboard, Keyboard};
use crate::telegram::TelegramError;
use async_trait::async_trait;
use std::sync::Mutex;

// ============================================================================
// Recording Transport
// ============================================================================

/// One outbound call observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        chat_id: ChatId,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edit {
        chat_id: ChatId,
        message_id: i64,
        text: String,
        buttons: Option<InlineKeyboard>,
    },
    CallbackAnswer {
        callback_id: String,
        text: Option<String>,
    },
}

/// Transport that records everything instead of talking to Telegram
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<Sent>>,
    fail_sends: bool,
    reject_callbacks: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose `send_message` always fails
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// A transport whose `answer_callback` fails the way Telegram does for
    /// queries older than a few minutes
    pub fn rejecting_callbacks() -> Self {
        Self {
            reject_callbacks: true,
            ..Self::default()
        }
    }

    /// Drain the recorded calls
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    /// Texts of plain messages sent so far, without draining
    pub fn message_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|sent| match sent {
                Sent::Message { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TelegramError> {
        if self.fail_sends {
            return Err(TelegramError::network("mock transport is down"));
        }
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: i64,
        text: &str,
        buttons: Option<&InlineKeyboard>,
    ) -> Result<(), TelegramError> {
        self.sent.lock().unwrap().push(Sent::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
            buttons: buttons.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        if self.reject_callbacks {
            return Err(TelegramError::api(
                400,
                "Bad Request: query is too old and response timeout expired or query ID is invalid",
            ));
        }
        self.sent.lock().unwrap().push(Sent::CallbackAnswer {
            callback_id: callback_id.to_string(),
            text: text.map(String::from),
        });
        Ok(())
    }
}

// ============================================================================
// Broken Store
// ============================================================================

/// Store whose every call fails, as if the database file were unreadable
#[derive(Default)]
pub struct BrokenStore {
    /// Number of calls attempted
    pub calls: Mutex<usize>,
}

impl BrokenStore {
    fn fail<T>(&self) -> Result<T, DbError> {
        *self.calls.lock().unwrap() += 1;
        Err(DbError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}

#[async_trait]
impl ItemStore for BrokenStore {
    async fn add(&self, _name: &str, _to_fridge: bool) -> Result<bool, DbError> {
        self.fail()
    }

    async fn remove(&self, _name: &str) -> Result<bool, DbError> {
        self.fail()
    }

    async fn list_fridge(&self) -> Result<Vec<String>, DbError> {
        self.fail()
    }

    async fn list_shopping(&self) -> Result<Vec<String>, DbError> {
        self.fail()
    }

    async fn mark_bought(&self, _name: &str) -> Result<bool, DbError> {
        self.fail()
    }
}
