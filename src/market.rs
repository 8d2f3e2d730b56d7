//! Index price source

use async_trait::async_trait;

use crate::error::RadarResult;

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest close of the watched instrument, truncated to an integer.
    ///
    /// An empty response is an error (`RadarError::NoPriceData`), never a
    /// placeholder value.
    async fn latest_price(&self) -> RadarResult<i64>;
}

#[async_trait]
impl<P: PriceSource + ?Sized> PriceSource for &P {
    async fn latest_price(&self) -> RadarResult<i64> {
        (**self).latest_price().await
    }
}
