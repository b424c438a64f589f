#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod covariance;
pub mod error;
pub mod tangency;
pub mod weights;

pub use covariance::{mean_returns, sample_covariance};
pub use error::{Result, WeightingError};
pub use tangency::{compute_optimal_weights, tangency_weights};
pub use weights::{WeightVector, WeightingMethod};
