mod common;

use common::{date, make_points, MockDataPort};
use std::fs;
use std::io::Write;
use stocklens::adapters::csv_adapter::CsvAdapter;
use stocklens::adapters::file_config_adapter::FileConfigAdapter;
use stocklens::domain::analysis::{run_analysis, AnalysisConfig};
use stocklens::domain::config_validation::build_analysis_config;
use stocklens::domain::error::StocklensError;
use stocklens::ports::data_port::DataPort;
use tempfile::{NamedTempFile, TempDir};

fn write_temp_ini(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn config_file_overrides_mode_defaults() {
    let file = write_temp_ini(
        r#"
[analysis]
sma_windows = 10, 20
rsi_window = 7
slope_threshold = 0.05
lookback_days = 90
"#,
    );
    let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
    let cfg = build_analysis_config(&adapter, AnalysisConfig::mid_term()).unwrap();

    assert_eq!(cfg.sma_windows, vec![10, 20]);
    assert_eq!(cfg.rsi_window, 7);
    assert_eq!(cfg.slope_threshold, 0.05);
    assert_eq!(cfg.lookback_days, 90);
    // Untouched keys keep the mode preset.
    assert_eq!(cfg.ema_windows, AnalysisConfig::mid_term().ema_windows);
}

#[test]
fn garbage_window_list_is_a_config_error() {
    let file = write_temp_ini("[analysis]\nsma_windows = 10, banana\n");
    let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
    let err = build_analysis_config(&adapter, AnalysisConfig::long_term()).unwrap_err();
    assert!(matches!(err, StocklensError::ConfigInvalid { .. }));
}

#[test]
fn csv_port_feeds_the_analysis_pipeline() {
    let dir = TempDir::new().unwrap();
    let mut csv = String::from("date,open,high,low,close,volume\n");
    for point in make_points(
        date("2023-01-01"),
        80,
        |i| 100.0 + (i as f64 * 0.3).sin() * 10.0,
        |_| 50_000,
    ) {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            point.date, point.open, point.high, point.low, point.close, point.volume
        ));
    }
    fs::write(dir.path().join("WAVE.csv"), csv).unwrap();

    let port = CsvAdapter::new(dir.path().to_path_buf());
    let points = port
        .fetch_daily("WAVE", date("2023-01-01"), date("2023-12-31"))
        .unwrap();
    assert_eq!(points.len(), 80);

    let cfg = AnalysisConfig {
        sma_windows: vec![3, 5],
        ema_windows: vec![2, 4],
        cross_fast_ema: 4,
        cross_slow_sma: 5,
        macd: stocklens::domain::indicator::MacdParams {
            fast: 3,
            slow: 6,
            signal: 2,
        },
        rsi_window: 3,
        regression_window: 4,
        price_smooth_window: 3,
        volume_smooth_window: 2,
        ..AnalysisConfig::long_term()
    };
    let report = run_analysis("WAVE", &points, &cfg).unwrap();
    assert_eq!(report.ticker, "WAVE");
    assert_eq!(report.close.len(), 80);
    assert_eq!(report.smas.len(), 2);
    assert_eq!(report.emas.len(), 2);
}

#[test]
fn mock_port_propagates_fetch_errors() {
    let port = MockDataPort::new().with_error("DOWN", "upstream unavailable");
    let err = port
        .fetch_daily("DOWN", date("2023-01-01"), date("2023-12-31"))
        .unwrap_err();
    match err {
        StocklensError::Fetch { reason } => assert_eq!(reason, "upstream unavailable"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn mock_port_filters_by_range() {
    let points = make_points(date("2023-01-01"), 30, |i| 100.0 + i as f64, |_| 1_000);
    let port = MockDataPort::new().with_points("TICK", points);

    let fetched = port
        .fetch_daily("TICK", date("2023-01-10"), date("2023-01-19"))
        .unwrap();
    assert_eq!(fetched.len(), 10);
    assert_eq!(fetched[0].date, date("2023-01-10"));
    assert_eq!(fetched[9].date, date("2023-01-19"));
}
