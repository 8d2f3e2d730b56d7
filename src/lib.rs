//! NIFTY Radar
//!
//! Watches the NIFTY 50 index during NSE market hours and alerts a Telegram
//! chat when the price approaches or crosses the trader's CE/PE targets.
//!
//! The trader sets targets by messaging the bot:
//!
//! ```text
//! CE : 25000
//! PE : 24500
//! BUFFER : 30
//! RADAR : Yes
//! ```
//!
//! ## Example
//! ```no_run
//! use nifty_radar::schedule::SystemClock;
//! use nifty_radar::telegram::TelegramBot;
//! use nifty_radar::yahoo::{YahooClient, NIFTY_50};
//! use nifty_radar::{Radar, Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load(".env")?;
//!     let bot = TelegramBot::new(&settings.telegram.bot_token, &settings.telegram.chat_id)?;
//!     let radar = Radar::new(
//!         settings.window,
//!         settings.timings,
//!         YahooClient::new(NIFTY_50)?,
//!         &bot,
//!         &bot,
//!         SystemClock::default(),
//!     );
//!     radar.run().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod market;
pub mod notify;
pub mod radar;
pub mod schedule;
pub mod targets;
pub mod telegram;
pub mod threshold;
pub mod yahoo;

pub use config::{Settings, Timings};
pub use error::{RadarError, RadarResult};
pub use radar::{Cycle, Radar, SessionReport};
pub use schedule::ScheduleWindow;
pub use targets::TargetSet;
pub use threshold::Zone;
