//! Daily OHLCV price point and input sequence validation.

use crate::domain::error::StocklensError;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl PricePoint {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Reject sequences the engine cannot analyse: empty input, out-of-order
/// or duplicate dates, non-positive prices, negative volume. Gaps (market
/// holidays) are fine.
pub fn validate_points(points: &[PricePoint]) -> Result<(), StocklensError> {
    if points.is_empty() {
        return Err(StocklensError::InvalidSeries {
            reason: "empty price series".to_string(),
        });
    }

    for window in points.windows(2) {
        if window[1].date <= window[0].date {
            return Err(StocklensError::InvalidSeries {
                reason: format!(
                    "dates not strictly increasing: {} followed by {}",
                    window[0].date, window[1].date
                ),
            });
        }
    }

    for p in points {
        if p.close <= 0.0 || p.open <= 0.0 || p.high <= 0.0 || p.low <= 0.0 {
            return Err(StocklensError::InvalidSeries {
                reason: format!("non-positive price on {}", p.date),
            });
        }
        if p.volume < 0 {
            return Err(StocklensError::InvalidSeries {
                reason: format!("negative volume on {}", p.date),
            });
        }
    }

    Ok(())
}
