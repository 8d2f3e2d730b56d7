//! Configuration management
//!
//! Bot credentials and optional overrides are read once at startup from a
//! dotenv-style key-value file loaded into the process environment.
//! Variables already exported in the environment win over the file.

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::schedule::ScheduleWindow;
use crate::yahoo::NIFTY_50;

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Settings {
    pub telegram: TelegramSettings,
    pub symbol: String,
    pub window: ScheduleWindow,
    pub timings: Timings,
    pub http_timeout: Duration,
}

#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Loop cadence and back-off durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Radar tick period
    pub tick: Duration,
    /// Wait after a session, or when outside market hours on a weekday
    pub idle_backoff: Duration,
    /// Wait after the market closes mid-session
    pub session_cooldown: Duration,
    /// Wait on Saturday and Sunday
    pub weekend_sleep: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            tick: Duration::from_secs(60),
            idle_backoff: Duration::from_secs(5 * 60),
            session_cooldown: Duration::from_secs(17 * 15 * 60),
            weekend_sleep: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl Settings {
    /// Load the key-value file into the environment, then read settings
    /// from it. Variables already set in the process take precedence.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            dotenv::from_path(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            info!("Loaded settings from {}", path.display());
        } else {
            warn!(
                "{} not found, reading settings from the environment",
                path.display()
            );
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} is not set", key))
        };

        let telegram = TelegramSettings {
            bot_token: required("BOT_TOKEN")?,
            chat_id: required("CHAT_ID")?,
        };

        let symbol = lookup("SYMBOL").unwrap_or_else(|| NIFTY_50.to_string());

        let defaults = ScheduleWindow::default();
        let start = match lookup("MARKET_OPEN") {
            Some(v) => parse_time(&v).context("Invalid MARKET_OPEN")?,
            None => defaults.start,
        };
        let end = match lookup("MARKET_CLOSE") {
            Some(v) => parse_time(&v).context("Invalid MARKET_CLOSE")?,
            None => defaults.end,
        };
        if start > end {
            bail!("MARKET_OPEN {} is after MARKET_CLOSE {}", start, end);
        }

        let mut timings = Timings::default();
        if let Some(v) = lookup("TICK_SECONDS") {
            let secs: u64 = v.trim().parse().context("Invalid TICK_SECONDS")?;
            if secs == 0 {
                bail!("TICK_SECONDS must be positive");
            }
            timings.tick = Duration::from_secs(secs);
        }

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.trim().parse().context("Invalid HTTP_TIMEOUT_SECS")?),
            None => Duration::from_secs(30),
        };

        Ok(Settings {
            telegram,
            symbol,
            window: ScheduleWindow::new(start, end),
            timings,
            http_timeout,
        })
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .with_context(|| format!("Expected HH:MM or HH:MM:SS, got '{}'", value))
}
