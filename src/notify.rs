//! Outbound notifications
//!
//! The radar only ever needs to push a line of text to the trader, so the
//! sink is a single fire-and-forget call. Implementations swallow their own
//! failures and report delivery as a boolean.

use async_trait::async_trait;

pub const RADAR_STARTED: &str = "Radar started";
pub const RADAR_STOPPED: &str = "⏸ Radar Stopped";
pub const RADAR_IDLE: &str = "failed to fetch, update the targets";
pub const WEEKEND: &str = "----weekend----";

/// Message sent when fetching or parsing the targets failed
pub fn target_error(error: &dyn std::fmt::Display) -> String {
    format!("received error : {}", error)
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text`. Returns whether delivery succeeded; never retries.
    async fn send(&self, text: &str) -> bool;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for &N {
    async fn send(&self, text: &str) -> bool {
        (**self).send(text).await
    }
}
