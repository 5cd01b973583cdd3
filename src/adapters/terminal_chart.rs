//! Terminal chart renderer.
//!
//! Draws the analysis report as fixed-width character panels on stdout:
//! price with moving-average overlays and a signal marker row, volume bars,
//! MACD, RSI with its threshold lines, and a chronological signal table.

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::StocklensError;
use crate::domain::series::Series;
use crate::ports::render_port::RenderPort;

const LABEL_WIDTH: usize = 11;
const GLYPHS: [char; 6] = ['*', 'o', '+', 'x', '~', '='];

pub struct TerminalChartAdapter {
    width: usize,
    height: usize,
}

impl Default for TerminalChartAdapter {
    fn default() -> Self {
        Self::new(100, 16)
    }
}

impl TerminalChartAdapter {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(20),
            height: height.max(4),
        }
    }
}

/// Averages each series into `width` column buckets so panels of any data
/// length share the same x axis.
fn downsample(series: &Series, width: usize) -> Vec<Option<f64>> {
    let len = series.len();
    if len == 0 {
        return vec![None; width];
    }

    let mut columns = Vec::with_capacity(width);
    for col in 0..width {
        let lo = col * len / width;
        let hi = (((col + 1) * len) / width).max(lo + 1).min(len);

        let mut sum = 0.0;
        let mut count = 0usize;
        for i in lo..hi {
            if let Some(v) = series.value(i) {
                sum += v;
                count += 1;
            }
        }
        columns.push(if count > 0 { Some(sum / count as f64) } else { None });
    }
    columns
}

fn value_bounds(columns: &[Vec<Option<f64>>]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in columns {
        for v in series.iter().flatten() {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    if min.is_finite() { Some((min, max)) } else { None }
}

/// Maps a value onto a grid row, row 0 being the top.
fn to_row(value: f64, min: f64, max: f64, height: usize) -> usize {
    let range = max - min;
    let frac = if range > 0.0 { (value - min) / range } else { 0.5 };
    let row = ((1.0 - frac) * (height - 1) as f64).round() as isize;
    row.clamp(0, height as isize - 1) as usize
}

struct Panel {
    grid: Vec<Vec<char>>,
    min: f64,
    max: f64,
}

impl Panel {
    fn new(width: usize, height: usize, min: f64, max: f64) -> Self {
        Self {
            grid: vec![vec![' '; width]; height],
            min,
            max,
        }
    }

    fn plot(&mut self, columns: &[Option<f64>], glyph: char) {
        let height = self.grid.len();
        for (col, value) in columns.iter().enumerate() {
            if let Some(v) = value {
                let row = to_row(*v, self.min, self.max, height);
                self.grid[row][col] = glyph;
            }
        }
    }

    fn plot_bars(&mut self, columns: &[Option<f64>]) {
        let height = self.grid.len();
        for (col, value) in columns.iter().enumerate() {
            if let Some(v) = value {
                let top = to_row(*v, self.min, self.max, height);
                for row in top..height {
                    self.grid[row][col] = '#';
                }
            }
        }
    }

    fn plot_hline(&mut self, value: f64, glyph: char) {
        if value < self.min || value > self.max {
            return;
        }
        let height = self.grid.len();
        let row = to_row(value, self.min, self.max, height);
        for cell in &mut self.grid[row] {
            if *cell == ' ' {
                *cell = glyph;
            }
        }
    }

    fn render(&self, out: &mut String) {
        let height = self.grid.len();
        for (row, cells) in self.grid.iter().enumerate() {
            let label = if row == 0 {
                format!("{:>width$.2}", self.max, width = LABEL_WIDTH)
            } else if row == height - 1 {
                format!("{:>width$.2}", self.min, width = LABEL_WIDTH)
            } else {
                " ".repeat(LABEL_WIDTH)
            };
            out.push_str(&label);
            out.push('|');
            out.extend(cells.iter());
            out.push('\n');
        }
    }
}

fn legend(entries: &[(char, &str)]) -> String {
    let body = entries
        .iter()
        .map(|(glyph, name)| format!("{} {}", glyph, name))
        .collect::<Vec<_>>()
        .join("   ");
    format!("{} {}\n", " ".repeat(LABEL_WIDTH + 1), body)
}

fn x_axis(report: &AnalysisReport, width: usize) -> String {
    let dates = report.close.dates();
    let mut line = format!("{}+{}\n", " ".repeat(LABEL_WIDTH), "-".repeat(width));
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        let left = first.format("%Y-%m-%d").to_string();
        let right = last.format("%Y-%m-%d").to_string();
        let gap = width.saturating_sub(left.len() + right.len());
        line.push_str(&" ".repeat(LABEL_WIDTH + 1));
        line.push_str(&left);
        line.push_str(&" ".repeat(gap));
        line.push_str(&right);
        line.push('\n');
    }
    line
}

/// One row under the price panel marking signal dates: `^` for bullish
/// signals, `v` for bearish, `!` when both land in the same column.
fn signal_markers(report: &AnalysisReport, width: usize) -> String {
    let dates = report.close.dates();
    if dates.is_empty() {
        return String::new();
    }
    let len = dates.len();

    let mut cells = vec![' '; width];
    for signal in report.all_signals() {
        let Some(index) = dates.iter().position(|d| *d == signal.date) else {
            continue;
        };
        let col = (index * width / len).min(width - 1);
        let glyph = if signal.kind.is_bullish() { '^' } else { 'v' };
        cells[col] = match cells[col] {
            ' ' => glyph,
            existing if existing == glyph => glyph,
            _ => '!',
        };
    }

    let mut line = " ".repeat(LABEL_WIDTH + 1);
    line.extend(cells);
    line.push('\n');
    line
}

fn price_panel(report: &AnalysisReport, width: usize, height: usize) -> String {
    let mut overlays: Vec<(&Series, char)> = vec![(&report.close, GLYPHS[0])];
    let mut next_glyph = 1usize;
    for series in report.emas.iter().chain(report.smas.iter()) {
        overlays.push((series, GLYPHS[next_glyph.min(GLYPHS.len() - 1)]));
        next_glyph += 1;
    }

    let columns: Vec<Vec<Option<f64>>> = overlays
        .iter()
        .map(|(series, _)| downsample(series, width))
        .collect();
    let Some((min, max)) = value_bounds(&columns) else {
        return String::new();
    };

    let mut panel = Panel::new(width, height, min, max);
    // Overlays first so the close price wins contested cells.
    for (i, (_, glyph)) in overlays.iter().enumerate().skip(1) {
        panel.plot(&columns[i], *glyph);
    }
    panel.plot(&columns[0], overlays[0].1);

    let mut out = format!("  {} price\n", report.ticker);
    panel.render(&mut out);
    out.push_str(&signal_markers(report, width));
    out.push_str(&x_axis(report, width));

    let entries: Vec<(char, &str)> = overlays
        .iter()
        .map(|(series, glyph)| (*glyph, series.name.as_str()))
        .collect();
    out.push_str(&legend(&entries));
    out
}

fn volume_panel(report: &AnalysisReport, width: usize, height: usize) -> String {
    let columns = downsample(&report.volume, width);
    let Some((min, max)) = value_bounds(std::slice::from_ref(&columns)) else {
        return String::new();
    };

    // Bars read better anchored at zero.
    let mut panel = Panel::new(width, height, min.min(0.0), max);
    panel.plot_bars(&columns);

    let mut out = "  volume\n".to_string();
    panel.render(&mut out);
    out
}

fn macd_panel(report: &AnalysisReport, width: usize, height: usize) -> String {
    let line = downsample(&report.macd.line, width);
    let signal = downsample(&report.macd.signal, width);
    let histogram = downsample(&report.macd.histogram, width);

    let all = [line.clone(), signal.clone(), histogram.clone()];
    let Some((min, max)) = value_bounds(&all) else {
        return String::new();
    };

    let mut panel = Panel::new(width, height, min, max);
    panel.plot_hline(0.0, '-');
    panel.plot_bars(&histogram);
    panel.plot(&signal, 'o');
    panel.plot(&line, '*');

    let mut out = "  MACD\n".to_string();
    panel.render(&mut out);
    out.push_str(&legend(&[
        ('*', report.macd.line.name.as_str()),
        ('o', report.macd.signal.name.as_str()),
        ('#', "histogram"),
    ]));
    out
}

fn rsi_panel(
    report: &AnalysisReport,
    overbought: f64,
    oversold: f64,
    width: usize,
    height: usize,
) -> String {
    let columns = downsample(&report.rsi, width);
    if value_bounds(std::slice::from_ref(&columns)).is_none() {
        return String::new();
    }

    let mut panel = Panel::new(width, height, 0.0, 100.0);
    panel.plot_hline(overbought, '-');
    panel.plot_hline(oversold, '-');
    panel.plot(&columns, '*');

    let mut out = format!("  {}\n", report.rsi.name);
    panel.render(&mut out);
    out
}

fn signal_table(report: &AnalysisReport) -> String {
    let mut out = "  signals\n".to_string();
    let all = report.all_signals();
    if all.is_empty() {
        out.push_str("    (none in range)\n");
        return out;
    }
    for signal in all {
        match signal.magnitude {
            Some(m) => out.push_str(&format!(
                "    {}  {:<16} {:>10.4}\n",
                signal.date.format("%Y-%m-%d"),
                signal.kind.to_string(),
                m
            )),
            None => out.push_str(&format!(
                "    {}  {}\n",
                signal.date.format("%Y-%m-%d"),
                signal.kind
            )),
        }
    }
    out
}

impl TerminalChartAdapter {
    fn format(&self, report: &AnalysisReport) -> String {
        // RSI thresholds are not carried on the report; the standard 70/30
        // reference lines are drawn regardless of the detector's settings.
        let mut out = String::new();
        out.push_str(&price_panel(report, self.width, self.height));
        out.push('\n');
        out.push_str(&volume_panel(report, self.width, self.height / 2));
        out.push('\n');
        out.push_str(&macd_panel(report, self.width, self.height / 2));
        out.push('\n');
        out.push_str(&rsi_panel(report, 70.0, 30.0, self.width, self.height / 2));
        out.push('\n');
        out.push_str(&signal_table(report));
        out
    }
}

impl RenderPort for TerminalChartAdapter {
    fn render(&self, report: &AnalysisReport) -> Result<(), StocklensError> {
        print!("{}", self.format(report));
        Ok(())
    }
}
