//! Size Factor
//!
//! Passes the raw market capitalization through per symbol. The log transform
//! and the small-cap sign convention are applied inside scoring, never here,
//! so the factor table always shows the untransformed capitalization.

use hobart_data::{MarketCapSeries, PricePanel};

use crate::error::Result;

/// Size reads raw market capitalization per panel symbol.
#[derive(Debug, Default)]
pub struct SizeFactor;

impl SizeFactor {
    /// Look up the market cap of every panel symbol, in column order.
    ///
    /// # Errors
    ///
    /// [`hobart_data::DataError::MissingMarketCap`] if the series does not
    /// cover a panel symbol.
    pub fn compute(&self, panel: &PricePanel, caps: &MarketCapSeries) -> Result<Vec<f64>> {
        panel
            .symbols()
            .iter()
            .map(|symbol| caps.value(symbol).map_err(Into::into))
            .collect()
    }
}
