//! Indicator engine: pure transforms from one series to another.
//!
//! Every operation takes a source [`Series`](crate::domain::series::Series)
//! and integer parameters and returns a new series (or bundle) with the same
//! date alignment. Rolling windows leave an undefined prefix; malformed
//! parameters fail with `InvalidParameter`, and inputs too short to produce
//! even one defined value fail with `InsufficientData`.

pub mod derivative;
pub mod ema;
pub mod macd;
pub mod regression;
pub mod rsi;
pub mod sma;

pub use derivative::derivative;
pub use ema::ema;
pub use macd::{macd, MacdParams, MacdSeries};
pub use regression::{linear_fit, regression_trend, LinearFit};
pub use rsi::rsi;
pub use sma::sma;

use crate::domain::error::StocklensError;
use crate::domain::series::Series;

/// Shared window checks: a window of zero is a caller bug, as is one longer
/// than the whole series; a window longer than the *defined* part means the
/// input cannot yield a single defined output point.
pub(crate) fn checked_suffix(
    series: &Series,
    window: usize,
    name: &str,
) -> Result<(usize, Vec<f64>), StocklensError> {
    if window == 0 {
        return Err(StocklensError::invalid_parameter(
            name,
            "window must be at least 1",
        ));
    }
    if window > series.len() {
        return Err(StocklensError::invalid_parameter(
            name,
            format!("window {} exceeds series length {}", window, series.len()),
        ));
    }
    let (start, values) = series
        .defined_suffix()
        .ok_or_else(|| StocklensError::insufficient_data(name, 0, window))?;
    if values.len() < window {
        return Err(StocklensError::insufficient_data(
            name,
            values.len(),
            window,
        ));
    }
    Ok((start, values))
}
