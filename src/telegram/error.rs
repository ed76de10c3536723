//! Telegram transport error types

use thiserror::Error;

/// Bot API error with classification
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Connection failures and timeouts
    #[error("network error: {0}")]
    Network(String),
    /// The API answered `ok: false`
    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },
    /// The response body was not what the API documents
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl TelegramError {
    #[allow(dead_code)] // Used in tests
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn api(code: i64, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            description: description.into(),
        }
    }

    /// Telegram refuses edits that would not change the message; the
    /// message already shows what we wanted, so this is not a failure.
    pub fn is_message_not_modified(&self) -> bool {
        matches!(self, Self::Api { code: 400, description } if description.contains("message is not modified"))
    }

    /// The token was rejected; retrying cannot help
    pub fn is_bad_token(&self) -> bool {
        matches!(self, Self::Api { code: 401 | 404, .. })
    }
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token
        let err = err.without_url();
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
