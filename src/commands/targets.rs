//! One-shot target check
//!
//! Unlike the radar, parse failures are reported on the console and nothing
//! is sent to the chat.

use anyhow::{Context, Result};
use std::path::PathBuf;

use nifty_radar::market::PriceSource;
use nifty_radar::targets::fetch_targets;
use nifty_radar::threshold::evaluate;
use nifty_radar::Settings;

pub fn run(env_file: PathBuf) -> Result<()> {
    let settings = Settings::load(&env_file)?;
    let bot = super::telegram_bot(&settings)?;
    let prices = super::yahoo_client(&settings)?;

    let targets = super::block_on(fetch_targets(&bot))?
        .context("Failed to fetch targets from the bot chat")?;

    println!("{}", targets);

    // Show where the index sits against them, if a price is available
    if let Ok(price) = super::block_on(prices.latest_price())? {
        println!("{}: {} -> {:?}", settings.symbol, price, evaluate(price, &targets));
    }
    Ok(())
}
