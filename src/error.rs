//! Error types shared by the market-data and Telegram clients

use thiserror::Error;

use crate::targets::TargetParseError;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("network error: {0}")]
    Transport(reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("no updates received by the bot")]
    NoUpdates,

    #[error("latest update carries no message text")]
    NoMessageText,

    #[error("no price data returned for {0}")]
    NoPriceData(String),

    #[error("parse error: {0}")]
    Parse(#[from] TargetParseError),
}

pub type RadarResult<T> = Result<T, RadarError>;

// Request URLs embed the bot token, keep them out of messages
impl From<reqwest::Error> for RadarError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl RadarError {
    /// Build an `Api` error from a non-success response, consuming its body
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Self::Api { status, body }
    }
}
