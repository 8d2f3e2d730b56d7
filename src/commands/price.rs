//! One-shot price check

use anyhow::{Context, Result};
use std::path::PathBuf;

use nifty_radar::market::PriceSource;
use nifty_radar::Settings;

pub fn run(env_file: PathBuf) -> Result<()> {
    let settings = Settings::load(&env_file)?;
    let client = super::yahoo_client(&settings)?;

    let price = super::block_on(client.latest_price())?
        .with_context(|| format!("Failed to fetch price for {}", client.symbol()))?;

    println!("{}: {}", client.symbol(), price);
    Ok(())
}
