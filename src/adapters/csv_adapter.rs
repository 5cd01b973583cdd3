//! CSV file data adapter.
//!
//! Reads daily bars from `<TICKER>.csv` files with a
//! `date,open,high,low,close,volume` header. Useful for offline runs and
//! for replaying downloaded history without hitting the network.

use crate::domain::error::StocklensError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker.to_uppercase()))
    }
}

fn fetch_error(reason: String) -> StocklensError {
    StocklensError::Fetch { reason }
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &str) -> Result<&'a str, StocklensError> {
    record
        .get(index)
        .ok_or_else(|| fetch_error(format!("missing {} column", name)))
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, StocklensError>
where
    T::Err: std::fmt::Display,
{
    field(record, index, name)?
        .parse()
        .map_err(|e| fetch_error(format!("invalid {} value: {}", name, e)))
}

impl DataPort for CsvAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, StocklensError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path)
            .map_err(|e| fetch_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| fetch_error(format!("CSV parse error: {}", e)))?;

            let date = NaiveDate::parse_from_str(field(&record, 0, "date")?, "%Y-%m-%d")
                .map_err(|e| fetch_error(format!("invalid date format: {}", e)))?;

            if date < start || date > end {
                continue;
            }

            points.push(PricePoint {
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n";

        fs::write(path.join("BHP.csv"), csv_content).unwrap();

        (dir, path)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_daily_returns_correct_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_daily("BHP", date(2024, 1, 15), date(2024, 1, 17))
            .unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, date(2024, 1, 15));
        assert_eq!(points[0].open, 100.0);
        assert_eq!(points[0].high, 110.0);
        assert_eq!(points[0].low, 90.0);
        assert_eq!(points[0].close, 105.0);
        assert_eq!(points[0].volume, 50000);
    }

    #[test]
    fn fetch_daily_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_daily("BHP", date(2024, 1, 16), date(2024, 1, 16))
            .unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, date(2024, 1, 16));
    }

    #[test]
    fn fetch_daily_is_case_insensitive_on_ticker() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_daily("bhp", date(2024, 1, 15), date(2024, 1, 17))
            .unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn fetch_daily_errors_for_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_daily("XYZ", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(StocklensError::Fetch { .. })));
    }

    #[test]
    fn fetch_daily_errors_for_bad_row() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("BAD.csv"),
            "date,open,high,low,close,volume\n2024-01-15,abc,110.0,90.0,105.0,50000\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_daily("BAD", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(StocklensError::Fetch { .. })));
    }
}
