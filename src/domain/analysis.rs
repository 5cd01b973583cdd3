//! Analysis orchestration: one ticker, one config, one immutable report.
//!
//! `run_analysis` computes every configured series from a validated price
//! sequence, runs all detectors, and condenses the latest bar into per
//! indicator-family advice. Nothing here touches the outside world; the
//! loader and renderer sit behind ports.

use std::collections::BTreeMap;

use crate::domain::advice::{self, Advice};
use crate::domain::detector::{detect_combined, detect_cross, detect_rsi_thresholds};
use crate::domain::error::StocklensError;
use crate::domain::indicator::{
    derivative, ema, linear_fit, macd, regression_trend, rsi, sma, LinearFit, MacdParams,
    MacdSeries,
};
use crate::domain::price::{validate_points, PricePoint};
use crate::domain::series::Series;
use crate::domain::signal::{Signal, SignalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    LongTerm,
    MidTerm,
}

/// Every indicator parameter in one place; no hidden globals. Mode presets
/// mirror the classic window sets, and an INI `[analysis]` section may
/// override any field.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub sma_windows: Vec<usize>,
    pub ema_windows: Vec<usize>,
    /// The fast EMA of the golden/death cross pair.
    pub cross_fast_ema: usize,
    /// The slow SMA of the golden/death cross pair.
    pub cross_slow_sma: usize,
    pub macd: MacdParams,
    pub rsi_window: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub regression_window: usize,
    pub price_smooth_window: usize,
    pub volume_smooth_window: usize,
    pub derivative_dead_band: f64,
    pub slope_threshold: f64,
    pub lookback_days: u32,
}

impl AnalysisConfig {
    /// ~2 years of daily bars: SMA 100/200, EMA 50/100, cross EMA50/SMA200.
    pub fn long_term() -> Self {
        Self {
            sma_windows: vec![100, 200],
            ema_windows: vec![50, 100],
            cross_fast_ema: 50,
            cross_slow_sma: 200,
            macd: MacdParams::default(),
            rsi_window: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            regression_window: 120,
            price_smooth_window: 100,
            volume_smooth_window: 3,
            derivative_dead_band: 0.0,
            slope_threshold: 0.01,
            lookback_days: 730,
        }
    }

    /// ~18 months of daily bars: SMA 50/100, EMA 20/50, cross EMA50/SMA100.
    pub fn mid_term() -> Self {
        Self {
            sma_windows: vec![50, 100],
            ema_windows: vec![20, 50],
            cross_fast_ema: 50,
            cross_slow_sma: 100,
            regression_window: 60,
            price_smooth_window: 50,
            lookback_days: 548,
            ..Self::long_term()
        }
    }

    pub fn for_mode(mode: AnalysisMode) -> Self {
        match mode {
            AnalysisMode::LongTerm => Self::long_term(),
            AnalysisMode::MidTerm => Self::mid_term(),
        }
    }

    pub fn validate(&self) -> Result<(), StocklensError> {
        for &w in self.sma_windows.iter().chain(&self.ema_windows) {
            if w == 0 {
                return Err(StocklensError::invalid_parameter(
                    "analysis",
                    "moving average windows must be at least 1",
                ));
            }
        }
        if self.cross_fast_ema == 0 || self.cross_slow_sma == 0 {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "cross pair windows must be at least 1",
            ));
        }
        if self.macd.fast == 0 || self.macd.signal == 0 || self.macd.fast >= self.macd.slow {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "MACD periods must satisfy 0 < fast < slow and signal > 0",
            ));
        }
        if self.rsi_window == 0 {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "RSI window must be at least 1",
            ));
        }
        if !(0.0 < self.rsi_oversold
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought < 100.0)
        {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "RSI thresholds must satisfy 0 < oversold < overbought < 100",
            ));
        }
        if self.regression_window < 2 {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "regression window must be at least 2",
            ));
        }
        if self.price_smooth_window == 0 || self.volume_smooth_window == 0 {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "smoothing windows must be at least 1",
            ));
        }
        if self.derivative_dead_band < 0.0 || self.slope_threshold < 0.0 {
            return Err(StocklensError::invalid_parameter(
                "analysis",
                "dead band and slope threshold must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Latest-bar stances, one per indicator family.
#[derive(Debug, Clone)]
pub struct AdviceSummary {
    pub trend: Advice,
    pub moving_average: Advice,
    pub momentum: Advice,
    pub macd: Advice,
    pub rsi: Advice,
}

/// Everything one analysis run produced. Constructed once, never mutated.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub ticker: String,
    pub close: Series,
    pub volume: Series,
    pub smas: Vec<Series>,
    pub emas: Vec<Series>,
    pub trend: LinearFit,
    pub rolling_trend: Series,
    pub price_derivative: Series,
    pub volume_derivative: Series,
    pub macd: MacdSeries,
    pub rsi: Series,
    /// One chronological sequence per kind; kinds with no events map to an
    /// empty sequence.
    pub signals: BTreeMap<SignalKind, Vec<Signal>>,
    pub advice: AdviceSummary,
}

impl AnalysisReport {
    pub fn signals_for(&self, kind: SignalKind) -> &[Signal] {
        self.signals.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All signals of every kind, merged chronologically.
    pub fn all_signals(&self) -> Vec<Signal> {
        let mut all: Vec<Signal> = self.signals.values().flatten().cloned().collect();
        all.sort_by_key(|s| s.date);
        all
    }
}

pub fn run_analysis(
    ticker: &str,
    points: &[PricePoint],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, StocklensError> {
    config.validate()?;
    validate_points(points)?;

    let dates: Vec<chrono::NaiveDate> = points.iter().map(|p| p.date).collect();
    let close_values: Vec<f64> = points.iter().map(|p| p.close).collect();
    let volume_values: Vec<f64> = points.iter().map(|p| p.volume as f64).collect();

    let close = Series::fully_defined("Close", &dates, &close_values);
    let volume = Series::fully_defined("Volume", &dates, &volume_values);

    let smas = config
        .sma_windows
        .iter()
        .map(|&w| sma(&close, w))
        .collect::<Result<Vec<_>, _>>()?;
    let emas = config
        .ema_windows
        .iter()
        .map(|&w| ema(&close, w))
        .collect::<Result<Vec<_>, _>>()?;

    let cross_fast = ema(&close, config.cross_fast_ema)?;
    let cross_slow = sma(&close, config.cross_slow_sma)?;

    // Derivatives run over a trailing-SMA smoothed copy so day-to-day noise
    // does not flip the decision tree.
    let smooth_close = sma(&close, config.price_smooth_window)?;
    let smooth_volume = sma(&volume, config.volume_smooth_window)?;
    let price_derivative = derivative(&smooth_close, 1)?;
    let volume_derivative = derivative(&smooth_volume, 1)?;

    let trend = linear_fit(&smooth_close)?;
    let rolling_trend = regression_trend(&close, config.regression_window)?;

    let macd_series = macd(&close, config.macd)?;
    let rsi_series = rsi(&close, config.rsi_window)?;

    let mut signals: BTreeMap<SignalKind, Vec<Signal>> =
        SignalKind::ALL.iter().map(|&k| (k, Vec::new())).collect();
    let mut record = |batch: Vec<Signal>| {
        for signal in batch {
            if let Some(bucket) = signals.get_mut(&signal.kind) {
                bucket.push(signal);
            }
        }
    };

    record(detect_cross(
        &cross_fast,
        &cross_slow,
        SignalKind::GoldenCross,
        SignalKind::DeathCross,
    ));
    record(detect_cross(
        &macd_series.line,
        &macd_series.signal,
        SignalKind::MacdBullish,
        SignalKind::MacdBearish,
    ));
    record(detect_rsi_thresholds(
        &rsi_series,
        config.rsi_overbought,
        config.rsi_oversold,
    ));
    record(detect_combined(
        &price_derivative,
        &volume_derivative,
        config.derivative_dead_band,
    ));

    // Price-crossing checks in priority order: the cross-pair EMA first,
    // then the remaining EMAs, then the SMAs.
    let mut ma_order: Vec<&Series> = vec![&cross_fast];
    for (series, &window) in emas.iter().zip(&config.ema_windows) {
        if window != config.cross_fast_ema {
            ma_order.push(series);
        }
    }
    ma_order.extend(smas.iter());

    let advice = AdviceSummary {
        trend: advice::slope_advice(trend.slope, config.slope_threshold),
        moving_average: advice::moving_average_advice(&close, &cross_fast, &cross_slow, &ma_order),
        momentum: advice::momentum_advice(
            &price_derivative,
            &volume_derivative,
            config.derivative_dead_band,
        ),
        macd: advice::macd_advice(&macd_series.line),
        rsi: advice::rsi_advice(&rsi_series, config.rsi_overbought, config.rsi_oversold),
    };

    Ok(AnalysisReport {
        ticker: ticker.to_string(),
        close,
        volume,
        smas,
        emas,
        trend,
        rolling_trend,
        price_derivative,
        volume_derivative,
        macd: macd_series,
        rsi: rsi_series,
        signals,
        advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_points(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close + 1.0,
                low: (close - 1.0).max(0.1),
                close,
                volume: 10_000,
            })
            .collect()
    }

    /// Small windows so tests stay readable.
    fn small_config() -> AnalysisConfig {
        AnalysisConfig {
            sma_windows: vec![3, 5],
            ema_windows: vec![2, 4],
            cross_fast_ema: 4,
            cross_slow_sma: 5,
            macd: MacdParams {
                fast: 3,
                slow: 6,
                signal: 2,
            },
            rsi_window: 3,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            regression_window: 5,
            price_smooth_window: 3,
            volume_smooth_window: 2,
            derivative_dead_band: 0.0,
            slope_threshold: 0.01,
            lookback_days: 30,
        }
    }

    #[test]
    fn report_carries_all_series() {
        let points = make_points(&(0..40).map(|x| 100.0 + (x as f64 * 0.5).sin() * 5.0).collect::<Vec<_>>());
        let report = run_analysis("TEST", &points, &small_config()).unwrap();

        assert_eq!(report.ticker, "TEST");
        assert_eq!(report.close.len(), 40);
        assert_eq!(report.volume.len(), 40);
        assert_eq!(report.smas.len(), 2);
        assert_eq!(report.emas.len(), 2);
        assert!(report.rsi.defined_count() > 0);
        assert!(report.macd.histogram.defined_count() > 0);
        assert!(report.rolling_trend.defined_count() > 0);
        assert!(report.price_derivative.defined_count() > 0);
    }

    #[test]
    fn signal_map_has_every_kind() {
        let points = make_points(&[100.0; 40]);
        let report = run_analysis("TEST", &points, &small_config()).unwrap();
        assert_eq!(report.signals.len(), SignalKind::ALL.len());
    }

    #[test]
    fn all_signals_is_chronological() {
        let closes: Vec<f64> = (0..60)
            .map(|x| 100.0 + (x as f64 * 0.4).sin() * 20.0)
            .collect();
        let report = run_analysis("TEST", &make_points(&closes), &small_config()).unwrap();

        let all = report.all_signals();
        for pair in all.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn signal_dates_come_from_input() {
        let closes: Vec<f64> = (0..60)
            .map(|x| 100.0 + (x as f64 * 0.4).sin() * 20.0)
            .collect();
        let points = make_points(&closes);
        let input_dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        let report = run_analysis("TEST", &points, &small_config()).unwrap();

        for signal in report.all_signals() {
            assert!(input_dates.contains(&signal.date));
        }
    }

    #[test]
    fn too_short_series_fails_loudly() {
        let points = make_points(&[100.0, 101.0, 102.0]);
        let err = run_analysis("TEST", &points, &small_config()).unwrap_err();
        assert!(matches!(err, StocklensError::InvalidParameter { .. }));
    }

    #[test]
    fn invalid_config_rejected_before_compute() {
        let mut config = small_config();
        config.rsi_oversold = 80.0; // above overbought
        let points = make_points(&[100.0; 40]);
        assert!(matches!(
            run_analysis("TEST", &points, &config),
            Err(StocklensError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn mode_presets() {
        let long = AnalysisConfig::long_term();
        assert_eq!(long.sma_windows, vec![100, 200]);
        assert_eq!(long.cross_slow_sma, 200);
        assert_eq!(long.lookback_days, 730);

        let mid = AnalysisConfig::mid_term();
        assert_eq!(mid.ema_windows, vec![20, 50]);
        assert_eq!(mid.cross_slow_sma, 100);
        assert_eq!(mid.lookback_days, 548);

        assert!(long.validate().is_ok());
        assert!(mid.validate().is_ok());
    }
}
