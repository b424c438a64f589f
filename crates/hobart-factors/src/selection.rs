//! Stock selection.
//!
//! Truncates a score series to the top N symbols. Validation of `n >= 1`
//! belongs to the boundary layer (strategy configuration); here `n = 0`
//! simply yields an empty selection.

use crate::scoring::ScoreSeries;

/// The first `n` symbols of the score series, i.e. the top N by score.
///
/// Returns all scored symbols when `n` exceeds their number. Because the
/// series is stably sorted, identical score ties select deterministically.
pub fn select_top(scores: &ScoreSeries, n: usize) -> Vec<String> {
    scores.symbols().take(n).map(str::to_string).collect()
}
