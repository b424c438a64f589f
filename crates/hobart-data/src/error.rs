//! Error types for data model operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for data model operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while constructing or slicing market data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Panel has no rows or no columns
    #[error("Price panel is empty")]
    EmptyPanel,

    /// Price matrix shape disagrees with the date/symbol axes
    #[error("Shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        /// Rows implied by the date axis
        expected_rows: usize,
        /// Columns implied by the symbol axis
        expected_cols: usize,
        /// Rows of the supplied matrix
        rows: usize,
        /// Columns of the supplied matrix
        cols: usize,
    },

    /// Dates must be strictly increasing
    #[error("Dates not strictly increasing at row {position}")]
    NonIncreasingDates {
        /// Index of the first offending row
        position: usize,
    },

    /// Symbol appears more than once on the column axis
    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(String),

    /// Price cell is non-positive or non-finite
    #[error("Invalid price {value} for {symbol} on {date}")]
    InvalidPrice {
        /// Symbol of the offending column
        symbol: String,
        /// Date of the offending row
        date: NaiveDate,
        /// The offending value
        value: f64,
    },

    /// Market capitalization is non-positive or non-finite
    #[error("Invalid market cap {value} for {symbol}")]
    InvalidMarketCap {
        /// Symbol of the offending entry
        symbol: String,
        /// The offending value
        value: f64,
    },

    /// Symbol not covered by the market-cap series
    #[error("Missing market cap for {symbol}")]
    MissingMarketCap {
        /// Symbol with no market-cap entry
        symbol: String,
    },

    /// Symbol not present in the panel
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Too few observations for the requested computation
    #[error("Insufficient history: need at least {required} rows, got {actual}")]
    InsufficientHistory {
        /// Required number of rows
        required: usize,
        /// Actual number of rows
        actual: usize,
    },
}
