#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod momentum;
pub mod scoring;
pub mod selection;
pub mod size;
pub mod table;
pub mod volatility;

pub use error::{FactorError, Result};
pub use momentum::{MomentumConfig, MomentumFactor};
pub use scoring::{FactorWeights, ScoreSeries, compute_score};
pub use selection::select_top;
pub use size::SizeFactor;
pub use table::{FactorConfig, FactorTable, compute_factors};
pub use volatility::{VolatilityConfig, VolatilityFactor};
