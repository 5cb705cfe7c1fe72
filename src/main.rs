mod api;
mod config;
mod error;
mod logger;
mod models;
mod telegram;
mod watcher;

use anyhow::Result;
use chrono::Utc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::telegram::TelegramClient;
use crate::watcher::Watcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "refusing to start: configuration is incomplete");
            return Err(err);
        }
    };

    tracing::info!(
        poll_interval_secs = config.poll_interval.as_secs(),
        "starting homework status watcher"
    );

    let api = ApiClient::new(config.practicum_token);
    let telegram = TelegramClient::new(config.telegram_token, config.telegram_chat_id);

    let mut watcher =
        Watcher::new(api, telegram, Utc::now().timestamp()).with_interval(config.poll_interval);
    watcher.run().await;

    Ok(())
}
