//! Error types for backtesting.

use thiserror::Error;

/// Result type for backtest operations.
pub type Result<T> = std::result::Result<T, BacktestError>;

/// Errors that can occur while running a backtest.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// Underlying data model error
    #[error(transparent)]
    Data(#[from] hobart_data::DataError),

    /// Weight vector does not cover a selected symbol
    #[error("No weight for selected symbol {symbol}")]
    MissingWeight {
        /// The uncovered symbol
        symbol: String,
    },

    /// Series axes disagree in length
    #[error("Series length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates
        dates: usize,
        /// Number of values
        values: usize,
    },

    /// Return series has no periods
    #[error("Return series is empty")]
    EmptySeries,
}
