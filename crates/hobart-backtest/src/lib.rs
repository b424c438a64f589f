#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod export;
pub mod series;
pub mod summary;

pub use engine::run_backtest;
pub use error::{BacktestError, Result};
pub use export::{BacktestExport, ExportError, ExportFormat, Exporter, ScoreExport, WeightExport};
pub use series::{CumulativeSeries, ReturnSeries};
pub use summary::PerformanceSummary;
