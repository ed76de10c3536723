//! Chat runtime executor

use super::traits::{ChatTransport, ItemStore};
use super::Inbound;

use crate::db::DbError;
use crate::state_machine::{transition, ChatContext, ChatId, ChatState, Effect, Event, ListView, Origin};
use crate::telegram::TelegramError;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Generic chat runtime that can work with any store and transport implementation
pub struct ChatRuntime<S, T>
where
    S: ItemStore,
    T: ChatTransport,
{
    store: S,
    transport: T,
    allowed_chats: HashSet<ChatId>,
    /// Pending prompt per chat; chats without an entry are idle
    sessions: Mutex<HashMap<ChatId, ChatState>>,
}

impl<S, T> ChatRuntime<S, T>
where
    S: ItemStore,
    T: ChatTransport,
{
    pub fn new(store: S, transport: T, allowed_chats: impl IntoIterator<Item = ChatId>) -> Self {
        Self {
            store,
            transport,
            allowed_chats: allowed_chats.into_iter().collect(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Current state of a chat
    pub fn state_of(&self, chat_id: ChatId) -> ChatState {
        self.sessions()
            .get(&chat_id)
            .copied()
            .unwrap_or_default()
    }

    fn set_state(&self, chat_id: ChatId, state: ChatState) {
        let mut sessions = self.sessions();
        if state.is_awaiting_input() {
            sessions.insert(chat_id, state);
        } else {
            sessions.remove(&chat_id);
        }
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<ChatId, ChatState>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle one inbound event to completion, including every follow-up
    /// event produced by store effects.
    pub async fn handle(&self, inbound: Inbound) -> Result<(), TelegramError> {
        let chat_id = inbound.chat_id;
        let context = ChatContext::new(chat_id, self.allowed_chats.contains(&chat_id));
        if !context.authorized {
            tracing::warn!(chat_id, "Event from chat outside the allow-list");
        }

        // We need to process events in a loop to handle chained effects
        let mut events_to_process = vec![inbound.event];

        while let Some(event) = events_to_process.pop() {
            let old_state = self.state_of(chat_id);
            let result = transition(old_state, &context, event);

            if result.new_state != old_state {
                tracing::debug!(chat_id, from = ?old_state, to = ?result.new_state, "Chat state changed");
                self.set_state(chat_id, result.new_state);
            }

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(chat_id, effect).await? {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    /// Execute an effect and optionally return a generated event
    async fn execute_effect(
        &self,
        chat_id: ChatId,
        effect: Effect,
    ) -> Result<Option<Event>, TelegramError> {
        match effect {
            Effect::SendMessage { text, keyboard } => {
                self.transport
                    .send_message(chat_id, &text, keyboard.as_ref())
                    .await?;
                Ok(None)
            }

            Effect::EditMessage {
                message_id,
                text,
                buttons,
            } => {
                match self
                    .transport
                    .edit_message(chat_id, message_id, &text, buttons.as_ref())
                    .await
                {
                    Err(e) if e.is_message_not_modified() => {
                        tracing::debug!(chat_id, message_id, "Message already up to date");
                        Ok(None)
                    }
                    other => other.map(|()| None),
                }
            }

            Effect::AnswerCallback { callback_id, text } => {
                // Stale queries are rejected after a restart; the edits that
                // follow still have to go out.
                if let Err(e) = self
                    .transport
                    .answer_callback(&callback_id, text.as_deref())
                    .await
                {
                    tracing::warn!(chat_id, callback_id = %callback_id, error = %e, "Failed to answer callback");
                }
                Ok(None)
            }

            Effect::AddItems { names, to_fridge } => {
                let mut added = Vec::new();
                let mut existed = Vec::new();

                for name in names {
                    match self.store.add(&name, to_fridge).await {
                        Ok(true) => added.push(name),
                        Ok(false) => existed.push(name),
                        Err(e) => return Ok(Some(storage_failed(chat_id, &e, Origin::Text))),
                    }
                }

                tracing::info!(
                    chat_id,
                    to_fridge,
                    added = added.len(),
                    existed = existed.len(),
                    "Items added"
                );
                Ok(Some(Event::ItemsAdded { added, existed }))
            }

            Effect::ListItems { view } => {
                let items = match view {
                    ListView::ShoppingCards => self.store.list_shopping().await,
                    ListView::FridgeSummary
                    | ListView::DeletePicker
                    | ListView::RefreshPicker { .. } => self.store.list_fridge().await,
                };

                Ok(Some(match items {
                    Ok(items) => Event::ItemsListed { view, items },
                    Err(e) => storage_failed(chat_id, &e, Origin::Text),
                }))
            }

            Effect::MarkBought { name, origin } => {
                Ok(Some(match self.store.mark_bought(&name).await {
                    Ok(success) => {
                        tracing::info!(chat_id, name = %name, success, "Mark bought");
                        Event::BoughtMarked {
                            name,
                            origin,
                            success,
                        }
                    }
                    Err(e) => storage_failed(chat_id, &e, origin),
                }))
            }

            Effect::RemoveItem { name, origin } => Ok(Some(match self.store.remove(&name).await {
                Ok(success) => {
                    tracing::info!(chat_id, name = %name, success, "Remove item");
                    Event::ItemRemoved {
                        name,
                        origin,
                        success,
                    }
                }
                Err(e) => storage_failed(chat_id, &e, origin),
            })),
        }
    }
}

fn storage_failed(chat_id: ChatId, error: &DbError, origin: Origin) -> Event {
    tracing::error!(chat_id, error = %error, "Item store operation failed");
    Event::StorageFailed { origin }
}
