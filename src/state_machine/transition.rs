//! Pure state transition function
//!
//! Given the current chat state and one event, decides the next state and
//! the effects to run. Store lookups are themselves effects whose outcomes
//! come back as events, so this function never does I/O.

use super::effect::{InlineButton, InlineKeyboard, Keyboard};
use super::event::{ButtonAction, Command, ListView, MenuAction, Origin};
use super::replies;
use super::{ChatContext, ChatState, Effect, Event};

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Pure transition function
pub fn transition(state: ChatState, context: &ChatContext, event: Event) -> TransitionResult {
    match event {
        // Works for everyone: it is how a new user learns the id to request access
        Event::Command {
            command: Command::MyId,
            ..
        } => TransitionResult::new(state).with_effect(Effect::send(replies::my_id(context.chat_id))),

        // ============================================================
        // Access control
        // ============================================================
        Event::Command { .. } | Event::Text { .. } if !context.authorized => {
            TransitionResult::new(state).with_effect(Effect::send(replies::ACCESS_DENIED))
        }

        Event::ButtonTap { callback_id, .. } if !context.authorized => TransitionResult::new(state)
            .with_effect(Effect::answer(callback_id, replies::ACCESS_DENIED_CALLBACK)),

        // ============================================================
        // Inbound events
        // ============================================================
        Event::Command {
            command: Command::Start,
            display_name,
        } => TransitionResult::new(state).with_effect(Effect::send_with(
            replies::welcome(display_name.as_deref()),
            Keyboard::Menu,
        )),

        Event::Text { text } => on_text(state, text.trim()),

        Event::ButtonTap {
            callback_id,
            message_id,
            payload,
        } => on_button_tap(state, callback_id, message_id, &payload),

        // ============================================================
        // Store outcomes
        // ============================================================
        Event::ItemsAdded { added, existed } => {
            let text = replies::add_summary(&added, &existed)
                .unwrap_or_else(|| replies::NOTHING_TO_ADD.to_string());
            TransitionResult::new(state).with_effect(Effect::send(text))
        }

        Event::ItemsListed { view, items } => {
            TransitionResult::new(state).with_effects(render_listing(view, &items))
        }

        Event::BoughtMarked {
            name,
            origin,
            success,
        } => TransitionResult::new(state).with_effects(render_bought(&name, origin, success)),

        Event::ItemRemoved {
            name,
            origin,
            success,
        } => TransitionResult::new(state).with_effects(render_removed(&name, origin, success)),

        Event::StorageFailed { origin } => {
            let effect = match origin.callback_id() {
                Some(callback_id) => Effect::answer(callback_id, replies::STORAGE_FAILURE),
                None => Effect::send(replies::STORAGE_FAILURE),
            };
            TransitionResult::new(state).with_effect(effect)
        }
    }
}

/// Split bulk input on commas, trimming each piece and dropping empty ones.
/// Order and repeats are preserved.
pub fn split_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn on_text(state: ChatState, text: &str) -> TransitionResult {
    // Menu entries win over a pending prompt
    if let Some(action) = MenuAction::from_label(text) {
        return on_menu(state, action);
    }

    match state {
        ChatState::AwaitingFridgeAdd | ChatState::AwaitingShoppingAdd => {
            let names = split_names(text);
            if names.is_empty() {
                return TransitionResult::new(ChatState::Idle)
                    .with_effect(Effect::send(replies::NOTHING_TO_ADD));
            }
            TransitionResult::new(ChatState::Idle).with_effect(Effect::AddItems {
                names,
                to_fridge: state == ChatState::AwaitingFridgeAdd,
            })
        }

        ChatState::AwaitingBoughtName => {
            TransitionResult::new(ChatState::Idle).with_effect(Effect::MarkBought {
                name: text.to_string(),
                origin: Origin::Text,
            })
        }

        ChatState::AwaitingRemoveName => {
            TransitionResult::new(ChatState::Idle).with_effect(Effect::RemoveItem {
                name: text.to_string(),
                origin: Origin::Text,
            })
        }

        ChatState::Idle => {
            TransitionResult::new(ChatState::Idle).with_effect(Effect::send(replies::CHOOSE_FROM_MENU))
        }
    }
}

fn on_menu(state: ChatState, action: MenuAction) -> TransitionResult {
    match action {
        MenuAction::AddToFridge => TransitionResult::new(ChatState::AwaitingFridgeAdd)
            .with_effect(Effect::send(replies::PROMPT_FRIDGE_ADD)),
        MenuAction::AddToShopping => TransitionResult::new(ChatState::AwaitingShoppingAdd)
            .with_effect(Effect::send(replies::PROMPT_SHOPPING_ADD)),
        MenuAction::MarkBought => TransitionResult::new(ChatState::AwaitingBoughtName)
            .with_effect(Effect::send(replies::PROMPT_BOUGHT_NAME)),
        MenuAction::ShowFridge => TransitionResult::new(state).with_effect(Effect::ListItems {
            view: ListView::FridgeSummary,
        }),
        MenuAction::ShowShopping => TransitionResult::new(state).with_effect(Effect::ListItems {
            view: ListView::ShoppingCards,
        }),
        MenuAction::Delete => TransitionResult::new(state).with_effect(Effect::ListItems {
            view: ListView::DeletePicker,
        }),
    }
}

fn on_button_tap(
    state: ChatState,
    callback_id: String,
    message_id: i64,
    payload: &str,
) -> TransitionResult {
    let Some(action) = ButtonAction::parse(payload) else {
        return TransitionResult::new(state).with_effect(Effect::acknowledge(callback_id));
    };

    let effect = match action {
        ButtonAction::Buy(name) => Effect::MarkBought {
            name,
            origin: Origin::ShoppingCard {
                callback_id,
                message_id,
            },
        },
        ButtonAction::Delete(name) => Effect::RemoveItem {
            name,
            origin: Origin::ShoppingCard {
                callback_id,
                message_id,
            },
        },
        ButtonAction::DeleteFridge(name) => Effect::RemoveItem {
            name,
            origin: Origin::FridgePicker {
                callback_id,
                message_id,
            },
        },
    };
    TransitionResult::new(state).with_effect(effect)
}

fn render_listing(view: ListView, items: &[String]) -> Vec<Effect> {
    match view {
        ListView::FridgeSummary if items.is_empty() => vec![Effect::send(replies::FRIDGE_EMPTY)],
        ListView::FridgeSummary => vec![Effect::send(replies::fridge_contents(items))],

        ListView::ShoppingCards if items.is_empty() => vec![Effect::send(replies::SHOPPING_EMPTY)],
        ListView::ShoppingCards => items
            .iter()
            .map(|item| {
                Effect::send_with(
                    replies::shopping_card(item),
                    Keyboard::Inline(vec![vec![
                        InlineButton::new(replies::BUY_BUTTON, ButtonAction::Buy(item.clone())),
                        InlineButton::new(replies::DELETE_BUTTON, ButtonAction::Delete(item.clone())),
                    ]]),
                )
            })
            .collect(),

        ListView::DeletePicker if items.is_empty() => {
            vec![Effect::send(replies::FRIDGE_EMPTY_NOTHING_TO_DELETE)]
        }
        ListView::DeletePicker => vec![Effect::send_with(
            replies::DELETE_PICKER_PROMPT,
            Keyboard::Inline(delete_picker(items)),
        )],

        ListView::RefreshPicker { message_id } if items.is_empty() => {
            vec![Effect::edit(message_id, replies::FRIDGE_EMPTY)]
        }
        ListView::RefreshPicker { message_id } => vec![Effect::EditMessage {
            message_id,
            text: replies::DELETE_PICKER_PROMPT.to_string(),
            buttons: Some(delete_picker(items)),
        }],
    }
}

fn delete_picker(items: &[String]) -> InlineKeyboard {
    items
        .iter()
        .map(|item| {
            vec![InlineButton::new(
                replies::delete_picker_button(item),
                ButtonAction::DeleteFridge(item.clone()),
            )]
        })
        .collect()
}

fn render_bought(name: &str, origin: Origin, success: bool) -> Vec<Effect> {
    match origin {
        Origin::Text => vec![Effect::send(replies::bought_by_text(name, success))],
        Origin::ShoppingCard {
            callback_id,
            message_id,
        }
        | Origin::FridgePicker {
            callback_id,
            message_id,
        } => {
            if success {
                vec![
                    Effect::answer(callback_id, replies::bought_toast(name)),
                    Effect::edit(message_id, replies::bought_card(name)),
                ]
            } else {
                vec![Effect::answer(callback_id, replies::not_found_toast(name))]
            }
        }
    }
}

fn render_removed(name: &str, origin: Origin, success: bool) -> Vec<Effect> {
    match origin {
        Origin::Text => vec![Effect::send(replies::removed_by_text(name, success))],
        Origin::ShoppingCard {
            callback_id,
            message_id,
        } => {
            if success {
                vec![
                    Effect::answer(callback_id, replies::removed_toast(name)),
                    Effect::edit(message_id, replies::removed_card(name)),
                ]
            } else {
                vec![Effect::answer(callback_id, replies::not_found_toast(name))]
            }
        }
        Origin::FridgePicker {
            callback_id,
            message_id,
        } => {
            if success {
                vec![
                    Effect::answer(callback_id, replies::removed_from_fridge_toast(name)),
                    Effect::ListItems {
                        view: ListView::RefreshPicker { message_id },
                    },
                ]
            } else {
                vec![Effect::answer(callback_id, replies::not_in_fridge_toast(name))]
            }
        }
    }
}
