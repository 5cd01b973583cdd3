#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use stocklens::domain::error::StocklensError;
pub use stocklens::domain::price::PricePoint;
use stocklens::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_points(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), points);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, StocklensError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(StocklensError::Fetch {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.date >= start && p.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_point(d: NaiveDate, close: f64, volume: i64) -> PricePoint {
    PricePoint {
        date: d,
        open: close,
        high: close + 1.0,
        low: (close - 1.0).max(0.01),
        close,
        volume,
    }
}

/// Builds `n` consecutive daily bars starting at `start`, with close and
/// volume produced per index.
pub fn make_points(
    start: NaiveDate,
    n: usize,
    close_at: impl Fn(usize) -> f64,
    volume_at: impl Fn(usize) -> i64,
) -> Vec<PricePoint> {
    (0..n)
        .map(|i| make_point(start + Days::new(i as u64), close_at(i), volume_at(i)))
        .collect()
}
