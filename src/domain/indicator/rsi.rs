//! RSI (Relative Strength Index), Wilder smoothing.
//!
//! First average gain/loss is a simple mean over the first `window`
//! changes; afterwards avg = (prev_avg * (n-1) + change) / n, and
//! RSI = 100 - 100/(1 + avg_gain/avg_loss).
//!
//! Division conventions (fixed): both averages zero → 50 (neutral, e.g. a
//! perfectly flat window), zero loss with gains → 100, zero gain with
//! losses → 0.

use crate::domain::error::StocklensError;
use crate::domain::series::Series;

pub const DEFAULT_WINDOW: usize = 14;

pub fn rsi(series: &Series, window: usize) -> Result<Series, StocklensError> {
    let name = format!("RSI({})", window);
    if window == 0 {
        return Err(StocklensError::invalid_parameter(
            &name,
            "window must be at least 1",
        ));
    }
    if window > series.len() {
        return Err(StocklensError::invalid_parameter(
            &name,
            format!("window {} exceeds series length {}", window, series.len()),
        ));
    }

    let (start, values) = series
        .defined_suffix()
        .ok_or_else(|| StocklensError::insufficient_data(&name, 0, window + 1))?;
    // Need window changes, i.e. window + 1 defined values.
    if values.len() <= window {
        return Err(StocklensError::insufficient_data(
            &name,
            values.len(),
            window + 1,
        ));
    }

    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| if c > 0.0 { c } else { 0.0 };
    let loss = |c: f64| if c < 0.0 { -c } else { 0.0 };

    let mut out: Vec<Option<f64>> = vec![None; series.len()];

    let mut avg_gain = changes[..window].iter().copied().map(gain).sum::<f64>() / window as f64;
    let mut avg_loss = changes[..window].iter().copied().map(loss).sum::<f64>() / window as f64;
    out[start + window] = Some(rs_to_rsi(avg_gain, avg_loss));

    for (i, &change) in changes.iter().enumerate().skip(window) {
        avg_gain = (avg_gain * (window - 1) as f64 + gain(change)) / window as f64;
        avg_loss = (avg_loss * (window - 1) as f64 + loss(change)) / window as f64;
        out[start + i + 1] = Some(rs_to_rsi(avg_gain, avg_loss));
    }

    Ok(Series::from_values(name, &series.dates(), out))
}

fn rs_to_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
