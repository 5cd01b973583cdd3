//! `[analysis]` section validation and config building.
//!
//! Every indicator parameter has a mode-preset default; the INI section
//! only needs the keys it wants to override. Malformed values fail with
//! `ConfigInvalid` before any computation runs.

use crate::domain::analysis::AnalysisConfig;
use crate::domain::error::StocklensError;
use crate::ports::config_port::ConfigPort;

const SECTION: &str = "analysis";

/// Apply `[analysis]` overrides from `config` on top of a mode preset.
pub fn build_analysis_config(
    config: &dyn ConfigPort,
    base: AnalysisConfig,
) -> Result<AnalysisConfig, StocklensError> {
    let mut cfg = base;

    if let Some(windows) = get_window_list(config, "sma_windows")? {
        cfg.sma_windows = windows;
    }
    if let Some(windows) = get_window_list(config, "ema_windows")? {
        cfg.ema_windows = windows;
    }
    cfg.cross_fast_ema = get_positive_int(config, "cross_fast_ema", cfg.cross_fast_ema)?;
    cfg.cross_slow_sma = get_positive_int(config, "cross_slow_sma", cfg.cross_slow_sma)?;
    cfg.macd.fast = get_positive_int(config, "macd_fast", cfg.macd.fast)?;
    cfg.macd.slow = get_positive_int(config, "macd_slow", cfg.macd.slow)?;
    cfg.macd.signal = get_positive_int(config, "macd_signal", cfg.macd.signal)?;
    cfg.rsi_window = get_positive_int(config, "rsi_window", cfg.rsi_window)?;
    cfg.rsi_overbought = get_double(config, "rsi_overbought", cfg.rsi_overbought)?;
    cfg.rsi_oversold = get_double(config, "rsi_oversold", cfg.rsi_oversold)?;
    cfg.regression_window = get_positive_int(config, "regression_window", cfg.regression_window)?;
    cfg.price_smooth_window =
        get_positive_int(config, "price_smooth_window", cfg.price_smooth_window)?;
    cfg.volume_smooth_window =
        get_positive_int(config, "volume_smooth_window", cfg.volume_smooth_window)?;
    cfg.derivative_dead_band =
        get_double(config, "derivative_dead_band", cfg.derivative_dead_band)?;
    cfg.slope_threshold = get_double(config, "slope_threshold", cfg.slope_threshold)?;
    cfg.lookback_days = get_positive_int(config, "lookback_days", cfg.lookback_days as usize)? as u32;

    // Cross-field constraints (threshold ordering, fast < slow) live on the
    // config struct itself.
    cfg.validate()?;
    Ok(cfg)
}

fn invalid(key: &str, reason: impl Into<String>) -> StocklensError {
    StocklensError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn get_window_list(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<Vec<usize>>, StocklensError> {
    let Some(raw) = config.get_string(SECTION, key) else {
        return Ok(None);
    };

    let mut windows = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let window: usize = part
            .parse()
            .map_err(|_| invalid(key, format!("'{}' is not a window size", part)))?;
        if window == 0 {
            return Err(invalid(key, "window sizes must be at least 1"));
        }
        windows.push(window);
    }

    if windows.is_empty() {
        return Err(invalid(key, "expected a comma-separated list of windows"));
    }
    Ok(Some(windows))
}

fn get_positive_int(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<usize, StocklensError> {
    let Some(raw) = config.get_string(SECTION, key) else {
        return Ok(default);
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(key, format!("'{}' is not an integer", raw)))?;
    if value < 1 {
        return Err(invalid(key, "must be at least 1"));
    }
    Ok(value as usize)
}

fn get_double(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, StocklensError> {
    let Some(raw) = config.get_string(SECTION, key) else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|_| invalid(key, format!("'{}' is not a number", raw)))
}
