//! Market-capitalization series with typed fallback provenance.
//!
//! Shares-outstanding data is not always available from the collaborator that
//! retrieves it. The documented fallback policy substitutes
//! `latest_price × an assumed constant share count` as a rough placeholder.
//! Rather than inferring that from a swallowed error, each entry carries its
//! [`CapSource`] so downstream consumers receive a typed signal.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Assumed share count used by the fallback market-cap policy (1 billion).
pub const DEFAULT_ASSUMED_SHARES: f64 = 1e9;

/// Provenance of a market-cap value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapSource {
    /// Computed from actual shares outstanding.
    Reported,
    /// Placeholder from the `price × assumed shares` fallback policy.
    Fallback,
}

/// A single market-capitalization observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCap {
    /// Capitalization in currency units, strictly positive.
    pub value: f64,
    /// Where the value came from.
    pub source: CapSource,
}

/// Ordered mapping from symbol to market capitalization.
///
/// Insertion order is preserved; keys are expected to cover (be a superset
/// of) the price panel's symbols, which factor computation verifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapSeries {
    entries: Vec<(String, MarketCap)>,
}

impl MarketCapSeries {
    /// Empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a capitalization computed from reported shares outstanding.
    ///
    /// # Errors
    ///
    /// [`DataError::InvalidMarketCap`] if `value` is non-positive or
    /// non-finite, [`DataError::DuplicateSymbol`] if the symbol is already
    /// present.
    pub fn insert_reported(&mut self, symbol: impl Into<String>, value: f64) -> Result<()> {
        self.insert(symbol.into(), value, CapSource::Reported)
    }

    /// Insert a fallback capitalization of `latest_price × assumed_shares`.
    ///
    /// Pass [`DEFAULT_ASSUMED_SHARES`] for the documented 1-billion-share
    /// placeholder policy.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::insert_reported`].
    pub fn insert_fallback(
        &mut self,
        symbol: impl Into<String>,
        latest_price: f64,
        assumed_shares: f64,
    ) -> Result<()> {
        self.insert(symbol.into(), latest_price * assumed_shares, CapSource::Fallback)
    }

    fn insert(&mut self, symbol: String, value: f64, source: CapSource) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DataError::InvalidMarketCap { symbol, value });
        }
        if self.entries.iter().any(|(s, _)| *s == symbol) {
            return Err(DataError::DuplicateSymbol(symbol));
        }
        self.entries.push((symbol, MarketCap { value, source }));
        Ok(())
    }

    /// Entry for a symbol, if present.
    pub fn get(&self, symbol: &str) -> Option<&MarketCap> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, cap)| cap)
    }

    /// Capitalization value for a symbol.
    ///
    /// # Errors
    ///
    /// [`DataError::MissingMarketCap`] if the symbol has no entry.
    pub fn value(&self, symbol: &str) -> Result<f64> {
        self.get(symbol)
            .map(|cap| cap.value)
            .ok_or_else(|| DataError::MissingMarketCap {
                symbol: symbol.to_string(),
            })
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols whose capitalization came from the fallback policy.
    pub fn fallback_symbols(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, cap)| cap.source == CapSource::Fallback)
            .map(|(s, _)| s.as_str())
            .collect()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MarketCap)> {
        self.entries.iter().map(|(s, cap)| (s.as_str(), cap))
    }
}
