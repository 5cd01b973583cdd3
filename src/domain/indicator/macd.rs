//! MACD (Moving Average Convergence Divergence).
//!
//! MACD line = EMA(fast) − EMA(slow); signal line = EMA of the MACD line;
//! histogram = line − signal. Standard parameters are (12, 26, 9). The
//! bundle stays undefined until all three component EMAs are defined,
//! i.e. for the first slow - 1 + signal - 1 positions.

use crate::domain::error::StocklensError;
use crate::domain::indicator::ema::ema;
use crate::domain::series::Series;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

/// The three MACD component series, date-aligned with the input.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Series,
    pub signal: Series,
    pub histogram: Series,
}

pub fn macd(series: &Series, params: MacdParams) -> Result<MacdSeries, StocklensError> {
    let name = format!("MACD({},{},{})", params.fast, params.slow, params.signal);
    if params.fast >= params.slow {
        return Err(StocklensError::invalid_parameter(
            &name,
            format!(
                "fast period {} must be shorter than slow period {}",
                params.fast, params.slow
            ),
        ));
    }

    let ema_fast = ema(series, params.fast)?;
    let ema_slow = ema(series, params.slow)?;

    let dates = series.dates();
    let line_values: Vec<Option<f64>> = (0..series.len())
        .map(|i| match (ema_fast.value(i), ema_slow.value(i)) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();
    let line = Series::from_values(format!("{} line", name), &dates, line_values);

    // The signal EMA runs over the MACD line itself; a series too short for
    // slow + signal warmup surfaces here as InsufficientData.
    let signal = ema(&line, params.signal)?;

    let histogram_values: Vec<Option<f64>> = (0..series.len())
        .map(|i| match (line.value(i), signal.value(i)) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();
    let histogram = Series::from_values(format!("{} histogram", name), &dates, histogram_values);

    Ok(MacdSeries {
        line,
        signal: Series::new(format!("{} signal", name), signal.points),
        histogram,
    })
}
