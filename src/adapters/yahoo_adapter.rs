//! Yahoo Finance data adapter.
//!
//! Fetches daily bars from the public v8 chart endpoint. Rows where Yahoo
//! reports a null quote (halted days, partial data) are skipped rather than
//! propagated as errors.

use crate::domain::error::StocklensError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

pub struct YahooAdapter {
    base_url: String,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooAdapter {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
        }
    }

    fn fetch_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        // period2 is exclusive on Yahoo's side, so push it to the end of day.
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
            .and_utc()
            .timestamp();
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            ticker.to_uppercase(),
            period1,
            period2
        )
    }
}

fn fetch_error(reason: String) -> StocklensError {
    StocklensError::Fetch { reason }
}

fn parse_chart(body: &str) -> Result<Vec<PricePoint>, StocklensError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| fetch_error(format!("malformed chart response: {}", e)))?;

    if let Some(err) = response.chart.error {
        return Err(fetch_error(format!("{}: {}", err.code, err.description)));
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| fetch_error("empty chart result".to_string()))?;

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| fetch_error("missing quote block".to_string()))?;

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| fetch_error(format!("timestamp out of range: {}", ts)))?
            .date_naive();

        let row = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = row {
            points.push(PricePoint {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }
    }

    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    Ok(points)
}

impl DataPort for YahooAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, StocklensError> {
        let url = self.fetch_url(ticker, start, end);

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| fetch_error(format!("client setup failed: {}", e)))?;

        let response = client
            .get(&url)
            .send()
            .map_err(|e| fetch_error(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| fetch_error(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            // Yahoo still sends a chart error body on most failures; prefer
            // its message when one parses.
            if let Err(parsed) = parse_chart(&body) {
                return Err(parsed);
            }
            return Err(fetch_error(format!("HTTP {} for {}", status, ticker)));
        }

        parse_chart(&body)
    }
}
