//! Telegram Bot API client
//!
//! The bot is both the alert channel (`sendMessage`) and the place the
//! trader posts targets (`getUpdates`).

mod client;
mod types;

pub use client::{ClientConfig, TelegramBot};
pub use types::*;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
