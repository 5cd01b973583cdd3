//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the SMA of the first n defined values, then
//! EMA[t] = value[t]*k + EMA[t-1]*(1-k). Same warmup as the SMA.

use crate::domain::error::StocklensError;
use crate::domain::indicator::checked_suffix;
use crate::domain::series::Series;

pub fn ema(series: &Series, window: usize) -> Result<Series, StocklensError> {
    let name = format!("EMA({})", window);
    let (start, values) = checked_suffix(series, window, &name)?;

    let k = 2.0 / (window as f64 + 1.0);
    let mut out: Vec<Option<f64>> = vec![None; series.len()];

    let seed: f64 = values[..window].iter().sum::<f64>() / window as f64;
    let mut current = seed;
    out[start + window - 1] = Some(seed);

    for (i, &v) in values.iter().enumerate().skip(window) {
        current = v * k + current * (1.0 - k);
        out[start + i] = Some(current);
    }

    Ok(Series::from_values(name, &series.dates(), out))
}
