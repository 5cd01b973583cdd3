//! Simple Moving Average.
//!
//! Trailing arithmetic mean of the last `window` values; the first
//! `window - 1` positions of the defined region stay undefined.

use crate::domain::error::StocklensError;
use crate::domain::indicator::checked_suffix;
use crate::domain::series::Series;

pub fn sma(series: &Series, window: usize) -> Result<Series, StocklensError> {
    let name = format!("SMA({})", window);
    let (start, values) = checked_suffix(series, window, &name)?;

    let mut out: Vec<Option<f64>> = vec![None; series.len()];
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out[start + i] = Some(sum / window as f64);
        }
    }

    Ok(Series::from_values(name, &series.dates(), out))
}
