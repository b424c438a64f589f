//! Validated price panel.
//!
//! A [`PricePanel`] is the dense, gap-free matrix of adjusted closing prices
//! the whole pipeline operates on: one row per trading date (ascending), one
//! column per symbol. Rows with missing cells must be dropped by the data
//! collaborator before construction; the constructor rejects anything that is
//! not strictly positive and finite.

use chrono::NaiveDate;
use ndarray::Array2;

use crate::error::{DataError, Result};

/// Dense dates × symbols matrix of adjusted closing prices.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePanel {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    prices: Array2<f64>,
}

impl PricePanel {
    /// Build a panel from its axes and price matrix.
    ///
    /// # Errors
    ///
    /// * [`DataError::EmptyPanel`] if either axis is empty
    /// * [`DataError::ShapeMismatch`] if the matrix does not match the axes
    /// * [`DataError::NonIncreasingDates`] if dates are not strictly ascending
    /// * [`DataError::DuplicateSymbol`] if a symbol repeats
    /// * [`DataError::InvalidPrice`] if any cell is non-positive or non-finite
    pub fn new(dates: Vec<NaiveDate>, symbols: Vec<String>, prices: Array2<f64>) -> Result<Self> {
        if dates.is_empty() || symbols.is_empty() {
            return Err(DataError::EmptyPanel);
        }
        if prices.nrows() != dates.len() || prices.ncols() != symbols.len() {
            return Err(DataError::ShapeMismatch {
                expected_rows: dates.len(),
                expected_cols: symbols.len(),
                rows: prices.nrows(),
                cols: prices.ncols(),
            });
        }
        for i in 1..dates.len() {
            if dates[i] <= dates[i - 1] {
                return Err(DataError::NonIncreasingDates { position: i });
            }
        }
        for (j, symbol) in symbols.iter().enumerate() {
            if symbols[..j].contains(symbol) {
                return Err(DataError::DuplicateSymbol(symbol.clone()));
            }
        }
        for ((i, j), &value) in prices.indexed_iter() {
            if !value.is_finite() || value <= 0.0 {
                return Err(DataError::InvalidPrice {
                    symbol: symbols[j].clone(),
                    date: dates[i],
                    value,
                });
            }
        }

        Ok(Self {
            dates,
            symbols,
            prices,
        })
    }

    /// Number of trading dates (rows).
    pub const fn num_dates(&self) -> usize {
        self.dates.len()
    }

    /// Number of symbols (columns).
    pub const fn num_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Date axis, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Symbol axis, in column order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The raw price matrix (rows = dates, columns = symbols).
    pub const fn prices(&self) -> &Array2<f64> {
        &self.prices
    }

    /// Column index of a symbol, if present.
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Most recent price for a symbol.
    ///
    /// # Errors
    ///
    /// [`DataError::UnknownSymbol`] if the symbol is not a panel column.
    pub fn latest_price(&self, symbol: &str) -> Result<f64> {
        let col = self
            .symbol_index(symbol)
            .ok_or_else(|| DataError::UnknownSymbol(symbol.to_string()))?;
        Ok(self.prices[[self.num_dates() - 1, col]])
    }

    /// Sub-panel containing only `symbols`, in the requested column order.
    ///
    /// # Errors
    ///
    /// [`DataError::UnknownSymbol`] if any requested symbol is absent, or
    /// [`DataError::EmptyPanel`] if `symbols` is empty.
    pub fn restrict<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(DataError::EmptyPanel);
        }
        let mut columns = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let col = self
                .symbol_index(symbol.as_ref())
                .ok_or_else(|| DataError::UnknownSymbol(symbol.as_ref().to_string()))?;
            columns.push(col);
        }

        let mut prices = Array2::<f64>::zeros((self.num_dates(), columns.len()));
        for (new_col, &old_col) in columns.iter().enumerate() {
            prices
                .column_mut(new_col)
                .assign(&self.prices.column(old_col));
        }

        Ok(Self {
            dates: self.dates.clone(),
            symbols: symbols.iter().map(|s| s.as_ref().to_string()).collect(),
            prices,
        })
    }

    /// Daily percentage returns, one row fewer than the panel.
    ///
    /// Row `t` of the result holds `price[t+1] / price[t] - 1` per symbol,
    /// i.e. the first panel row has no return (no prior-day reference).
    ///
    /// # Errors
    ///
    /// [`DataError::InsufficientHistory`] if the panel has fewer than 2 rows.
    pub fn daily_returns(&self) -> Result<Array2<f64>> {
        let rows = self.num_dates();
        if rows < 2 {
            return Err(DataError::InsufficientHistory {
                required: 2,
                actual: rows,
            });
        }

        let cols = self.num_symbols();
        let mut returns = Array2::<f64>::zeros((rows - 1, cols));
        for t in 1..rows {
            for j in 0..cols {
                returns[[t - 1, j]] = self.prices[[t, j]] / self.prices[[t - 1, j]] - 1.0;
            }
        }
        Ok(returns)
    }

    /// Dates the return rows of [`Self::daily_returns`] correspond to
    /// (every panel date except the first).
    pub fn return_dates(&self) -> &[NaiveDate] {
        &self.dates[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample_panel() -> PricePanel {
        let dates = vec![date(1), date(2), date(3)];
        let symbols = vec!["AAA".to_string(), "BBB".to_string()];
        let prices =
            Array2::from_shape_vec((3, 2), vec![100.0, 50.0, 110.0, 55.0, 99.0, 60.5]).unwrap();
        PricePanel::new(dates, symbols, prices).unwrap()
    }

    #[test]
    fn test_valid_panel() {
        let panel = sample_panel();
        assert_eq!(panel.num_dates(), 3);
        assert_eq!(panel.num_symbols(), 2);
        assert_eq!(panel.symbol_index("BBB"), Some(1));
        assert_eq!(panel.symbol_index("ZZZ"), None);
    }

    #[test]
    fn test_empty_panel_rejected() {
        let result = PricePanel::new(vec![], vec!["AAA".to_string()], Array2::zeros((0, 1)));
        assert!(matches!(result, Err(DataError::EmptyPanel)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let result = PricePanel::new(
            vec![date(1), date(2)],
            vec!["AAA".to_string()],
            Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
        );
        assert!(matches!(result, Err(DataError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_non_increasing_dates_rejected() {
        let result = PricePanel::new(
            vec![date(2), date(2)],
            vec!["AAA".to_string()],
            Array2::from_shape_vec((2, 1), vec![1.0, 2.0]).unwrap(),
        );
        assert!(matches!(
            result,
            Err(DataError::NonIncreasingDates { position: 1 })
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let result = PricePanel::new(
            vec![date(1)],
            vec!["AAA".to_string(), "AAA".to_string()],
            Array2::from_shape_vec((1, 2), vec![1.0, 2.0]).unwrap(),
        );
        assert!(matches!(result, Err(DataError::DuplicateSymbol(_))));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let result = PricePanel::new(
            vec![date(1), date(2)],
            vec!["AAA".to_string()],
            Array2::from_shape_vec((2, 1), vec![1.0, 0.0]).unwrap(),
        );
        assert!(matches!(result, Err(DataError::InvalidPrice { .. })));

        let result = PricePanel::new(
            vec![date(1)],
            vec!["AAA".to_string()],
            Array2::from_shape_vec((1, 1), vec![f64::NAN]).unwrap(),
        );
        assert!(matches!(result, Err(DataError::InvalidPrice { .. })));
    }

    #[test]
    fn test_daily_returns() {
        let panel = sample_panel();
        let returns = panel.daily_returns().unwrap();

        assert_eq!(returns.nrows(), 2);
        assert_abs_diff_eq!(returns[[0, 0]], 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(returns[[0, 1]], 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(returns[[1, 0]], -0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(returns[[1, 1]], 0.10, epsilon = 1e-12);
        assert_eq!(panel.return_dates(), &panel.dates()[1..]);
    }

    #[test]
    fn test_daily_returns_needs_two_rows() {
        let panel = PricePanel::new(
            vec![date(1)],
            vec!["AAA".to_string()],
            Array2::from_shape_vec((1, 1), vec![100.0]).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            panel.daily_returns(),
            Err(DataError::InsufficientHistory {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_restrict_preserves_requested_order() {
        let panel = sample_panel();
        let sub = panel.restrict(&["BBB", "AAA"]).unwrap();

        assert_eq!(sub.symbols(), &["BBB".to_string(), "AAA".to_string()]);
        assert_abs_diff_eq!(sub.prices()[[0, 0]], 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sub.prices()[[0, 1]], 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_restrict_unknown_symbol() {
        let panel = sample_panel();
        assert!(matches!(
            panel.restrict(&["AAA", "ZZZ"]),
            Err(DataError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn test_latest_price() {
        let panel = sample_panel();
        assert_abs_diff_eq!(panel.latest_price("BBB").unwrap(), 60.5, epsilon = 1e-12);
        assert!(panel.latest_price("ZZZ").is_err());
    }
}
