//! Yahoo Finance client for the latest daily close

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::ChartResponse;
use super::YAHOO_API_BASE;
use crate::error::{RadarError, RadarResult};
use crate::market::PriceSource;

/// Yahoo rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) nifty-radar/0.1";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Yahoo chart client bound to one symbol
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    config: ClientConfig,
    symbol: String,
}

impl YahooClient {
    pub fn new(symbol: impl Into<String>) -> RadarResult<Self> {
        Self::with_config(symbol, ClientConfig::default())
    }

    pub fn with_config(symbol: impl Into<String>, config: ClientConfig) -> RadarResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            config,
            symbol: symbol.into(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fetch the chart series
    ///
    /// # Arguments
    /// * `range` - History span (e.g., "1d", "5d")
    /// * `interval` - Bar size (e.g., "1m", "1d")
    pub async fn get_chart(&self, range: &str, interval: &str) -> RadarResult<ChartResponse> {
        let url = format!("{}/v8/finance/chart/{}", self.config.base_url, self.symbol);

        debug!(
            "Fetching chart: symbol={}, range={}, interval={}",
            self.symbol, range, interval
        );

        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RadarError::from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Latest close from the most recent trading day
    pub async fn latest_close(&self) -> RadarResult<f64> {
        let chart = self.get_chart("1d", "1d").await?;
        if let Some(err) = &chart.chart.error {
            debug!("Yahoo chart error for {}: {} {}", self.symbol, err.code, err.description);
        }
        chart
            .last_close()
            .ok_or_else(|| RadarError::NoPriceData(self.symbol.clone()))
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn latest_price(&self) -> RadarResult<i64> {
        let close = self.latest_close().await?;
        Ok(close.trunc() as i64)
    }
}
