//! Series loader port trait.

use crate::domain::error::StocklensError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

/// Supplies the daily OHLCV history for one ticker. The ticker string is
/// forwarded opaquely; whether it exists is the loader's concern. Fetch
/// failures surface as [`StocklensError::Fetch`]; the core never retries.
pub trait DataPort {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, StocklensError>;
}
