//! Telegram Bot API transport
//!
//! Long-polls `getUpdates`, turns updates into [`Inbound`] events for the
//! runtime and renders outbound effects as Bot API calls.

mod error;
mod types;

pub use error::TelegramError;
pub use types::*;

use crate::runtime::{ChatRuntime, ChatTransport, Inbound, ItemStore};
use crate::state_machine::{ChatId, Command, Event, InlineKeyboard, Keyboard};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Update kinds the bot asks Telegram for
const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Pause after a failed poll before asking again
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Slack on top of the long-poll timeout before the HTTP request gives up
const HTTP_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

/// Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    /// `https://api.telegram.org/bot<token>`
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(poll_timeout + HTTP_TIMEOUT_SLACK)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    async fn call<Req, Res>(&self, method: &str, body: &Req) -> Result<Res, TelegramError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(body)
            .send()
            .await?;

        // Error responses carry the same JSON envelope, whatever the status
        let status = response.status();
        let envelope: ApiResponse<Res> = response.json().await?;
        if envelope.ok {
            envelope
                .result
                .ok_or_else(|| TelegramError::Decode(format!("{method}: ok response without result")))
        } else {
            Err(TelegramError::api(
                envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                envelope.description.unwrap_or_default(),
            ))
        }
    }

    /// Fetch pending updates, waiting up to `timeout` for the first one
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &request).await
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: keyboard.map(ReplyMarkup::from_keyboard),
        };
        let _: Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: i64,
        text: &str,
        buttons: Option<&InlineKeyboard>,
    ) -> Result<(), TelegramError> {
        let request = EditMessageTextRequest {
            chat_id,
            message_id,
            text,
            reply_markup: buttons.map(|rows| InlineKeyboardMarkup::from_rows(rows)),
        };
        let _: Value = self.call("editMessageText", &request).await?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: callback_id,
            text,
        };
        let _: Value = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}

/// Convert an update into a runtime event.
///
/// Returns `None` for updates the bot does not react to (stickers, photos,
/// callbacks without a message or payload).
pub fn inbound_from_update(update: Update) -> Option<Inbound> {
    if let Some(message) = update.message {
        let text = message.text?;
        let event = match Command::parse(&text) {
            Some(command) => Event::Command {
                command,
                display_name: message.from.map(|user| user.first_name),
            },
            None => Event::Text { text },
        };
        return Some(Inbound {
            chat_id: message.chat.id,
            event,
        });
    }

    let query = update.callback_query?;
    let message = query.message?;
    Some(Inbound {
        chat_id: message.chat.id,
        event: Event::ButtonTap {
            callback_id: query.id,
            message_id: message.message_id,
            payload: query.data?,
        },
    })
}

/// Poll for updates and hand them to the runtime one at a time until
/// Ctrl-C is received or the token is rejected.
pub async fn run_polling<S, T>(
    runtime: &ChatRuntime<S, T>,
    client: &TelegramClient,
    poll_timeout: Duration,
) -> Result<(), TelegramError>
where
    S: ItemStore,
    T: ChatTransport,
{
    let mut offset: Option<i64> = None;
    tracing::info!(timeout_secs = poll_timeout.as_secs(), "Polling for updates");

    loop {
        let updates = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                return Ok(());
            }
            result = client.get_updates(offset, poll_timeout) => result,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) if e.is_bad_token() => {
                tracing::error!(error = %e, "Bot token rejected");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Polling failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            let update_id = update.update_id;
            offset = Some(update_id + 1);

            let Some(inbound) = inbound_from_update(update) else {
                tracing::debug!(update_id, "Ignoring update");
                continue;
            };

            let chat_id = inbound.chat_id;
            if let Err(e) = runtime.handle(inbound).await {
                tracing::error!(update_id, chat_id, error = %e, "Error handling update");
            }
        }
    }
}
