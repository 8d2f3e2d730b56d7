//! Yahoo chart API response structures

use serde::Deserialize;

/// `GET /v8/finance/chart/{symbol}` response
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

/// One OHLCV series; Yahoo pads missing bars with `null`
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ChartResponse {
    /// Last non-null close of the first result
    pub fn last_close(&self) -> Option<f64> {
        self.chart
            .result
            .as_ref()?
            .first()?
            .indicators
            .quote
            .first()?
            .close
            .iter()
            .rev()
            .find_map(|c| *c)
    }
}
