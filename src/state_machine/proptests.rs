//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::split_names;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![
        Just(ChatState::Idle),
        Just(ChatState::AwaitingFridgeAdd),
        Just(ChatState::AwaitingShoppingAdd),
        Just(ChatState::AwaitingBoughtName),
        Just(ChatState::AwaitingRemoveName),
    ]
}

fn arb_menu_action() -> impl Strategy<Value = MenuAction> {
    prop_oneof![
        Just(MenuAction::AddToFridge),
        Just(MenuAction::AddToShopping),
        Just(MenuAction::ShowFridge),
        Just(MenuAction::ShowShopping),
        Just(MenuAction::MarkBought),
        Just(MenuAction::Delete),
    ]
}

fn arb_free_text() -> impl Strategy<Value = String> {
    "[a-zA-Zа-я ,]{0,40}"
}

fn arb_payload() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|name| format!("buy:{name}")),
        "[a-z]{1,8}".prop_map(|name| format!("delete:{name}")),
        "[a-z]{1,8}".prop_map(|name| format!("delete_fridge:{name}")),
        "[a-z:]{0,12}",
    ]
}

fn arb_inbound_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_free_text().prop_map(|text| Event::Text { text }),
        arb_menu_action().prop_map(|action| Event::Text {
            text: action.label().to_string()
        }),
        (arb_payload(), 1i64..10_000).prop_map(|(payload, message_id)| Event::ButtonTap {
            callback_id: "cb".to_string(),
            message_id,
            payload,
        }),
        Just(Event::Command {
            command: Command::Start,
            display_name: Some("Test".to_string()),
        }),
        Just(Event::Command {
            command: Command::MyId,
            display_name: None,
        }),
    ]
}

fn arb_origin() -> impl Strategy<Value = Origin> {
    prop_oneof![
        Just(Origin::Text),
        (1i64..100).prop_map(|message_id| Origin::ShoppingCard {
            callback_id: "cb".to_string(),
            message_id,
        }),
        (1i64..100).prop_map(|message_id| Origin::FridgePicker {
            callback_id: "cb".to_string(),
            message_id,
        }),
    ]
}

fn arb_outcome_event() -> impl Strategy<Value = Event> {
    let names = proptest::collection::vec("[a-z]{1,8}", 0..5);
    prop_oneof![
        (names.clone(), names.clone()).prop_map(|(added, existed)| Event::ItemsAdded { added, existed }),
        names.prop_map(|items| Event::ItemsListed {
            view: ListView::FridgeSummary,
            items,
        }),
        ("[a-z]{1,8}", arb_origin(), any::<bool>()).prop_map(|(name, origin, success)| {
            Event::BoughtMarked {
                name,
                origin,
                success,
            }
        }),
        ("[a-z]{1,8}", arb_origin(), any::<bool>()).prop_map(|(name, origin, success)| {
            Event::ItemRemoved {
                name,
                origin,
                success,
            }
        }),
        arb_origin().prop_map(|origin| Event::StorageFailed { origin }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// A chat outside the allow-list never reaches the store and never moves state
    #[test]
    fn prop_unauthorized_never_touches_store(state in arb_state(), event in arb_inbound_event()) {
        let context = ChatContext::new(1, false);
        let result = transition(state, &context, event);

        prop_assert_eq!(result.new_state, state);
        prop_assert!(!result.effects.iter().any(Effect::is_store_effect));
        prop_assert_eq!(result.effects.len(), 1);
    }

    /// Every inbound event produces at least one effect, so the user always
    /// gets an answer
    #[test]
    fn prop_inbound_always_answered(state in arb_state(), event in arb_inbound_event()) {
        let context = ChatContext::new(1, true);
        let result = transition(state, &context, event);
        prop_assert!(!result.effects.is_empty());
    }

    /// Free text that is not a menu label always returns the chat to idle
    #[test]
    fn prop_free_text_resets_to_idle(state in arb_state(), text in arb_free_text()) {
        prop_assume!(MenuAction::from_label(text.trim()).is_none());
        let context = ChatContext::new(1, true);
        let result = transition(state, &context, Event::Text { text });
        prop_assert_eq!(result.new_state, ChatState::Idle);
    }

    /// Button taps never change the pending prompt
    #[test]
    fn prop_button_taps_keep_state(state in arb_state(), payload in arb_payload()) {
        let context = ChatContext::new(1, true);
        let event = Event::ButtonTap {
            callback_id: "cb".to_string(),
            message_id: 3,
            payload,
        };
        let result = transition(state, &context, event);
        prop_assert_eq!(result.new_state, state);
    }

    /// Store outcomes only render replies; they never change state
    #[test]
    fn prop_outcomes_keep_state(state in arb_state(), event in arb_outcome_event()) {
        let context = ChatContext::new(1, true);
        let result = transition(state, &context, event);
        prop_assert_eq!(result.new_state, state);
        prop_assert!(!result.effects.is_empty());
    }

    /// Bulk add attempts every non-blank comma-separated piece, in order
    #[test]
    fn prop_bulk_add_keeps_every_token(pieces in proptest::collection::vec("[ ]{0,2}[a-z]{0,6}[ ]{0,2}", 1..8)) {
        let input = pieces.join(",");
        let expected: Vec<String> = pieces
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        prop_assert_eq!(split_names(&input), expected.clone());

        let context = ChatContext::new(1, true);
        let result = transition(ChatState::AwaitingShoppingAdd, &context, Event::Text { text: input });
        if expected.is_empty() {
            prop_assert!(!result.effects.iter().any(Effect::is_store_effect));
        } else {
            prop_assert_eq!(
                result.effects,
                vec![Effect::AddItems { names: expected, to_fridge: false }]
            );
        }
    }
}
