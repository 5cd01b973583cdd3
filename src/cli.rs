//! CLI definition and dispatch.

use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::terminal_chart::TerminalChartAdapter;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::analysis::{run_analysis, AnalysisConfig, AnalysisMode, AnalysisReport};
use crate::domain::config_validation::build_analysis_config;
use crate::ports::data_port::DataPort;
use crate::ports::render_port::RenderPort;

#[derive(Parser, Debug)]
#[command(name = "stocklens", about = "Technical analysis for a single ticker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    /// Slow windows, two years of history
    Long,
    /// Faster windows, eighteen months of history
    Mid,
}

impl From<ModeArg> for AnalysisMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Long => AnalysisMode::LongTerm,
            ModeArg::Mid => AnalysisMode::MidTerm,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a ticker and print the report
    Analyze {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
        #[arg(short, long, value_enum, default_value = "long")]
        mode: ModeArg,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Read bars from <DIR>/<TICKER>.csv instead of Yahoo Finance
        #[arg(long, value_name = "DIR")]
        csv: Option<PathBuf>,
        /// Override the mode's history window
        #[arg(long)]
        lookback_days: Option<u32>,
        /// Print the advice summary and signal table only
        #[arg(long)]
        no_chart: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            ticker,
            mode,
            config,
            csv,
            lookback_days,
            no_chart,
        } => run_analyze(
            &ticker,
            mode,
            config.as_ref(),
            csv.as_ref(),
            lookback_days,
            no_chart,
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn resolve_config(
    mode: ModeArg,
    adapter: Option<&FileConfigAdapter>,
    lookback_days: Option<u32>,
) -> Result<AnalysisConfig, ExitCode> {
    let base = AnalysisConfig::for_mode(mode.into());

    let mut cfg = match adapter {
        Some(adapter) => build_analysis_config(adapter, base).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })?,
        None => base,
    };

    if let Some(days) = lookback_days {
        cfg.lookback_days = days;
    }
    Ok(cfg)
}

/// `[chart]` section overrides for the terminal renderer.
fn build_renderer(adapter: Option<&FileConfigAdapter>) -> TerminalChartAdapter {
    use crate::ports::config_port::ConfigPort;
    match adapter {
        Some(config) => TerminalChartAdapter::new(
            config.get_int("chart", "width", 100) as usize,
            config.get_int("chart", "height", 16) as usize,
        ),
        None => TerminalChartAdapter::default(),
    }
}

fn date_range(lookback_days: u32) -> (NaiveDate, NaiveDate) {
    let end = Local::now().date_naive();
    let start = end
        .checked_sub_days(Days::new(lookback_days as u64))
        .unwrap_or(end);
    (start, end)
}

fn stance_marker(advice: &crate::domain::advice::Advice) -> &'static str {
    use crate::domain::advice::Stance;
    match advice.stance {
        Stance::Buy => "\x1b[32m●\x1b[0m",
        Stance::Sell => "\x1b[31m●\x1b[0m",
        Stance::Hold => "\x1b[33m●\x1b[0m",
    }
}

fn print_summary(report: &AnalysisReport) {
    let advice = &report.advice;
    println!("=== {} ===", report.ticker);
    if let Some((date, close)) = report.close.last_defined() {
        println!("Last close: {:.2} on {}", close, date);
    }
    println!(
        "Trend: slope {:+.4}/day, intercept {:.2}",
        report.trend.slope, report.trend.intercept
    );
    for (label, item) in [
        ("trend", &advice.trend),
        ("moving average", &advice.moving_average),
        ("momentum", &advice.momentum),
        ("MACD", &advice.macd),
        ("RSI", &advice.rsi),
    ] {
        println!(
            "  {} {:<15} {:<5} {}",
            stance_marker(item),
            label,
            item.stance.to_string(),
            item.reason
        );
    }
    println!();
}

fn run_analyze(
    ticker: &str,
    mode: ModeArg,
    config_path: Option<&PathBuf>,
    csv_dir: Option<&PathBuf>,
    lookback_days: Option<u32>,
    no_chart: bool,
) -> ExitCode {
    // Stage 1: resolve configuration
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };
    let cfg = match resolve_config(mode, adapter.as_ref(), lookback_days) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Stage 2: fetch daily bars
    let (start, end) = date_range(cfg.lookback_days);
    let data_port: Box<dyn DataPort> = match csv_dir {
        Some(dir) => Box::new(CsvAdapter::new(dir.clone())),
        None => Box::new(YahooAdapter::new()),
    };

    eprintln!("Fetching {} from {} to {}", ticker.to_uppercase(), start, end);
    let points = match data_port.fetch_daily(ticker, start, end) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  {} bars", points.len());

    // Stage 3: run the analysis
    let report = match run_analysis(&ticker.to_uppercase(), &points, &cfg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: print summary, then charts
    print_summary(&report);

    if no_chart {
        for signal in report.all_signals() {
            println!("{}  {}", signal.date, signal.kind);
        }
        return ExitCode::SUCCESS;
    }

    let renderer = build_renderer(adapter.as_ref());
    match renderer.render(&report) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    for (label, base) in [
        ("long", AnalysisConfig::long_term()),
        ("mid", AnalysisConfig::mid_term()),
    ] {
        match build_analysis_config(&adapter, base) {
            Ok(cfg) => {
                eprintln!(
                    "  {} mode: SMA {:?}, EMA {:?}, RSI {}, lookback {} days",
                    label, cfg.sma_windows, cfg.ema_windows, cfg.rsi_window, cfg.lookback_days
                );
            }
            Err(e) => {
                eprintln!("error ({label} mode): {e}");
                return (&e).into();
            }
        }
    }

    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_arg_maps_to_analysis_mode() {
        assert!(matches!(
            AnalysisMode::from(ModeArg::Long),
            AnalysisMode::LongTerm
        ));
        assert!(matches!(
            AnalysisMode::from(ModeArg::Mid),
            AnalysisMode::MidTerm
        ));
    }

    #[test]
    fn date_range_spans_lookback() {
        let (start, end) = date_range(30);
        assert_eq!(end - start, chrono::TimeDelta::days(30));
    }

    #[test]
    fn cli_parses_analyze() {
        let cli = Cli::try_parse_from(["stocklens", "analyze", "AAPL", "--mode", "mid"]).unwrap();
        match cli.command {
            Command::Analyze { ticker, mode, .. } => {
                assert_eq!(ticker, "AAPL");
                assert!(matches!(mode, ModeArg::Mid));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["stocklens", "analyze", "AAPL", "--mode", "weekly"]).is_err());
    }
}
