//! Radar command

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use nifty_radar::schedule::SystemClock;
use nifty_radar::{Radar, Settings};

pub fn run(env_file: PathBuf) -> Result<()> {
    let settings = Settings::load(&env_file)
        .with_context(|| format!("Failed to load settings from {}", env_file.display()))?;

    info!("════════════════════════════════════════════");
    info!("  NIFTY RADAR");
    info!("  Symbol:   {}", settings.symbol);
    info!(
        "  Window:   {} - {} (UTC{}), Mon-Fri",
        settings.window.start, settings.window.end, settings.window.offset
    );
    info!("  Tick:     {:?}", settings.timings.tick);
    info!("  Chat:     {}", settings.telegram.chat_id);
    info!("════════════════════════════════════════════");

    let bot = super::telegram_bot(&settings)?;
    let prices = super::yahoo_client(&settings)?;
    let clock = SystemClock::new(settings.window.offset);

    let radar = Radar::new(
        settings.window,
        settings.timings,
        prices,
        &bot,
        &bot,
        clock,
    );

    super::block_on(radar.run())
}
