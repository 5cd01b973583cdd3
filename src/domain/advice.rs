//! Latest-bar stance: what each indicator family says about the most
//! recent close.
//!
//! These functions look at the last two bars only and condense them into a
//! Buy/Sell/Hold stance with a reason, for the summary block printed above
//! the charts. The full-history event scan lives in
//! [`detector`](crate::domain::detector).

use crate::domain::series::Series;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stance::Buy => "Buy",
            Stance::Sell => "Sell",
            Stance::Hold => "Hold",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone)]
pub struct Advice {
    pub stance: Stance,
    pub reason: String,
}

impl Advice {
    fn new(stance: Stance, reason: impl Into<String>) -> Self {
        Self {
            stance,
            reason: reason.into(),
        }
    }

    fn hold(reason: impl Into<String>) -> Self {
        Self::new(Stance::Hold, reason)
    }
}

/// Values of a series at the last two bars, when both are defined.
fn tail_pair(series: &Series) -> Option<(f64, f64)> {
    let n = series.len();
    if n < 2 {
        return None;
    }
    Some((series.value(n - 2)?, series.value(n - 1)?))
}

fn crossed_above(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.0 && a.1 > b.1
}

fn crossed_below(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 > b.0 && a.1 < b.1
}

/// Moving-average advice with the classic priority chain: a fresh
/// golden/death cross between the configured fast EMA and slow SMA wins;
/// otherwise the close crossing any of the other averages, checked in the
/// given order; otherwise hold.
pub fn moving_average_advice(
    close: &Series,
    cross_fast: &Series,
    cross_slow: &Series,
    others: &[&Series],
) -> Advice {
    if let (Some(fast), Some(slow)) = (tail_pair(cross_fast), tail_pair(cross_slow)) {
        if crossed_above(fast, slow) {
            return Advice::new(Stance::Buy, "Golden Cross (strong buy)");
        }
        if crossed_below(fast, slow) {
            return Advice::new(Stance::Sell, "Death Cross (strong sell)");
        }
    }

    if let Some(price) = tail_pair(close) {
        for ma in others {
            let Some(level) = tail_pair(ma) else { continue };
            if crossed_above(price, level) {
                return Advice::new(Stance::Buy, format!("price crossed above {}", ma.name));
            }
            if crossed_below(price, level) {
                return Advice::new(Stance::Sell, format!("price crossed below {}", ma.name));
            }
        }
    }

    Advice::hold("no signal detected")
}

/// MACD zero-line posture: fresh zero crossings first, then direction of
/// travel on the current side of zero.
pub fn macd_advice(line: &Series) -> Advice {
    let Some((prev, last)) = tail_pair(line) else {
        return Advice::hold("MACD not yet defined");
    };

    if prev < 0.0 && last > 0.0 {
        Advice::new(Stance::Buy, "MACD crossed above zero, bullish momentum")
    } else if last > 0.0 && last > prev {
        Advice::new(Stance::Buy, "MACD positive and rising, bullish trend")
    } else if prev > 0.0 && last < 0.0 {
        Advice::new(Stance::Sell, "MACD crossed below zero, bearish momentum")
    } else if last < 0.0 && last < prev {
        Advice::new(Stance::Sell, "MACD negative and falling, bearish trend")
    } else {
        Advice::hold("neutral momentum")
    }
}

pub fn rsi_advice(rsi: &Series, overbought: f64, oversold: f64) -> Advice {
    let Some((_, last)) = rsi.last_defined() else {
        return Advice::hold("RSI not yet defined");
    };

    if last > overbought {
        Advice::new(
            Stance::Sell,
            format!("RSI {:.1} > {:.0}, overbought", last, overbought),
        )
    } else if last < oversold {
        Advice::new(
            Stance::Buy,
            format!("RSI {:.1} < {:.0}, oversold", last, oversold),
        )
    } else {
        Advice::hold("RSI neutral")
    }
}

/// Decision tree over the latest price and volume derivatives.
pub fn momentum_advice(price_deriv: &Series, volume_deriv: &Series, dead_band: f64) -> Advice {
    let (Some((_, pd)), Some((_, vd))) = (price_deriv.last_defined(), volume_deriv.last_defined())
    else {
        return Advice::hold("derivatives not yet defined");
    };

    let price_up = pd > dead_band;
    let price_down = pd < -dead_band;
    let volume_up = vd > dead_band;
    let volume_down = vd < -dead_band;

    if price_up && volume_up {
        Advice::new(Stance::Buy, "strong trend")
    } else if price_up && volume_down {
        Advice::hold("weak trend")
    } else if price_down && volume_up {
        Advice::new(Stance::Sell, "strong downward trend")
    } else if price_down && volume_down {
        Advice::hold("weak downward trend")
    } else {
        Advice::hold("flat")
    }
}

/// Stance from the whole-series regression slope; |slope| below the
/// threshold counts as flat.
pub fn slope_advice(slope: f64, threshold: f64) -> Advice {
    if slope.abs() < threshold {
        Advice::hold("no slope")
    } else if slope > 0.0 {
        Advice::new(Stance::Buy, "positive slope")
    } else {
        Advice::new(Stance::Sell, "negative slope")
    }
}
