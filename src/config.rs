//! Process configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Chats allowed to use the bot. Anyone else can only run `/myid`.
pub const ALLOWED_CHATS: &[i64] = &[
    934_625_858, // Dmitry
    613_878_272, // Olga
];

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
const RAILWAY_DB_PATH: &str = "/data/fridge.db";
const LOCAL_DB_PATH: &str = "fridge.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Configuration for the bot process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub db_path: PathBuf,
    pub api_url: String,
    pub poll_timeout: Duration,
}

/// Load `.env` from the working directory into the process environment.
/// Variables that are already set are kept; a missing file is fine.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let db_path = match lookup("FRIDGE_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None if lookup("RAILWAY").as_deref() == Some("1") => PathBuf::from(RAILWAY_DB_PATH),
            None => PathBuf::from(LOCAL_DB_PATH),
        };

        let api_url = lookup("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let poll_timeout = match lookup("POLL_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "POLL_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Self {
            token,
            db_path,
            api_url,
            poll_timeout: Duration::from_secs(poll_timeout),
        })
    }
}
