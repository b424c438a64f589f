#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export main types from sub-crates
pub use hobart_backtest as backtest;
pub use hobart_data as data;
pub use hobart_factors as factors;
pub use hobart_portfolio as portfolio;

// Re-export the pipeline surface for convenience
pub use pipeline::{StrategyConfig, StrategyError, StrategyReport, run_strategy};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
