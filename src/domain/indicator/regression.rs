//! Least-squares trend lines.
//!
//! Closed-form fit of y = m*x + n with x as the 0-based bar index:
//!   m = (k*Σxy - Σx*Σy) / (k*Σx² - (Σx)²),  n = (Σy - m*Σx) / k
//!
//! [`regression_trend`] fits over a rolling trailing window and emits the
//! fitted value at the window end; [`linear_fit`] fits the whole defined
//! region once, for the overall trend line and its slope stance.

use crate::domain::error::StocklensError;
use crate::domain::indicator::checked_suffix;
use crate::domain::series::Series;

/// Whole-series fit: slope, intercept, and the fitted line as a series.
#[derive(Debug, Clone)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub line: Series,
}

fn fit(values: &[f64]) -> (f64, f64) {
    let k = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let m = (k * sum_xy - sum_x * sum_y) / (k * sum_x2 - sum_x * sum_x);
    let n = (sum_y - m * sum_x) / k;
    (m, n)
}

/// Rolling least-squares trend: at each date, the fitted value of the line
/// over the trailing `window` points, evaluated at the window end.
pub fn regression_trend(series: &Series, window: usize) -> Result<Series, StocklensError> {
    let name = format!("TREND({})", window);
    if window < 2 {
        return Err(StocklensError::invalid_parameter(
            &name,
            "window must be at least 2",
        ));
    }
    let (start, values) = checked_suffix(series, window, &name)?;

    let mut out: Vec<Option<f64>> = vec![None; series.len()];
    for end in (window - 1)..values.len() {
        let slice = &values[end + 1 - window..=end];
        let (m, n) = fit(slice);
        out[start + end] = Some(m * (window - 1) as f64 + n);
    }

    Ok(Series::from_values(name, &series.dates(), out))
}

/// Single fit over every defined point; the returned line is defined
/// wherever the input is.
pub fn linear_fit(series: &Series) -> Result<LinearFit, StocklensError> {
    let name = "TREND";
    let (start, values) = series
        .defined_suffix()
        .ok_or_else(|| StocklensError::insufficient_data(name, 0, 2))?;
    if values.len() < 2 {
        return Err(StocklensError::insufficient_data(name, values.len(), 2));
    }

    let (slope, intercept) = fit(&values);
    let mut out: Vec<Option<f64>> = vec![None; series.len()];
    for i in 0..values.len() {
        out[start + i] = Some(slope * i as f64 + intercept);
    }

    Ok(LinearFit {
        slope,
        intercept,
        line: Series::from_values(name, &series.dates(), out),
    })
}
