//! Fridge Bot - family grocery tracker for Telegram
//!
//! Keeps one list of what is in the fridge and one of what to buy, driven
//! by a menu keyboard and inline buttons.

mod config;
mod db;
mod runtime;
mod state_machine;
mod telegram;

use config::{BotConfig, ALLOWED_CHATS};
use db::Database;
use runtime::{ChatRuntime, ProductionRuntime};
use telegram::TelegramClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fridge_bot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    config::load_dotenv();
    let config = BotConfig::from_env()?;

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Initialize database
    tracing::info!(path = %config.db_path.display(), "Opening database");
    let db = Database::open(&config.db_path)?;

    let client = TelegramClient::new(&config.api_url, &config.token, config.poll_timeout)?;
    let runtime: ProductionRuntime =
        ChatRuntime::new(db, client.clone(), ALLOWED_CHATS.iter().copied());

    tracing::info!(allowed_chats = ALLOWED_CHATS.len(), "Fridge bot started");
    telegram::run_polling(&runtime, &client, config.poll_timeout).await?;

    tracing::info!("Fridge bot stopped");
    Ok(())
}
