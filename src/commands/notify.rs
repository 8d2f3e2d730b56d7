//! Test notification

use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::info;

use nifty_radar::notify::Notifier;
use nifty_radar::Settings;

pub fn run(env_file: PathBuf, text: String) -> Result<()> {
    let settings = Settings::load(&env_file)?;
    let bot = super::telegram_bot(&settings)?;

    if !super::block_on(bot.send(&text))? {
        bail!("Failed to deliver test message to chat {}", bot.chat_id());
    }

    info!("Test message delivered to chat {}", bot.chat_id());
    Ok(())
}
