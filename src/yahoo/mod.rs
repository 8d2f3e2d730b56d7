//! Yahoo Finance chart API client
//!
//! Public market data, no API key required. Used for the NIFTY 50 index
//! (`^NSEI`), which the broker APIs do not expose without a session.

mod client;
mod types;

pub use client::{ClientConfig, YahooClient};
pub use types::*;

/// Base URL for the Yahoo Finance API
pub const YAHOO_API_BASE: &str = "https://query1.finance.yahoo.com";

/// NIFTY 50 index symbol
pub const NIFTY_50: &str = "^NSEI";
