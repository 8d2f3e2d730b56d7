pub mod notify;
pub mod price;
pub mod run;
pub mod targets;

use anyhow::{Context, Result};
use std::future::Future;

use nifty_radar::telegram::{self, TelegramBot};
use nifty_radar::yahoo::{self, YahooClient};
use nifty_radar::Settings;

/// Drive `fut` on a single-threaded runtime
pub(crate) fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    Ok(runtime.block_on(fut))
}

pub(crate) fn telegram_bot(settings: &Settings) -> Result<TelegramBot> {
    let config = telegram::ClientConfig::default().with_timeout(settings.http_timeout);
    TelegramBot::with_config(
        &settings.telegram.bot_token,
        &settings.telegram.chat_id,
        config,
    )
    .context("Failed to create Telegram client")
}

pub(crate) fn yahoo_client(settings: &Settings) -> Result<YahooClient> {
    let config = yahoo::ClientConfig::default().with_timeout(settings.http_timeout);
    YahooClient::with_config(&settings.symbol, config).context("Failed to create Yahoo client")
}
