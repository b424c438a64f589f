#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod market_cap;
pub mod panel;

pub use error::{DataError, Result};
pub use market_cap::{CapSource, DEFAULT_ASSUMED_SHARES, MarketCap, MarketCapSeries};
pub use panel::PricePanel;

/// Trading days per calendar year, used for annualization throughout Hobart.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
