//! Discrete trading signals emitted by the detector.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    GoldenCross,
    DeathCross,
    MacdBullish,
    MacdBearish,
    RsiOverbought,
    RsiOversold,
    CombinedBuy,
    CombinedSell,
}

impl SignalKind {
    pub const ALL: [SignalKind; 8] = [
        SignalKind::GoldenCross,
        SignalKind::DeathCross,
        SignalKind::MacdBullish,
        SignalKind::MacdBearish,
        SignalKind::RsiOverbought,
        SignalKind::RsiOversold,
        SignalKind::CombinedBuy,
        SignalKind::CombinedSell,
    ];

    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            SignalKind::GoldenCross
                | SignalKind::MacdBullish
                | SignalKind::RsiOversold
                | SignalKind::CombinedBuy
        )
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalKind::GoldenCross => "GOLDEN_CROSS",
            SignalKind::DeathCross => "DEATH_CROSS",
            SignalKind::MacdBullish => "MACD_BULLISH",
            SignalKind::MacdBearish => "MACD_BEARISH",
            SignalKind::RsiOverbought => "RSI_OVERBOUGHT",
            SignalKind::RsiOversold => "RSI_OVERSOLD",
            SignalKind::CombinedBuy => "COMBINED_BUY",
            SignalKind::CombinedSell => "COMBINED_SELL",
        };
        write!(f, "{}", name)
    }
}

/// One detected event. `magnitude` carries whatever strength measure the
/// detector has available (gap after a crossing, RSI value at the
/// threshold crossing); it is absent where no natural measure exists.
#[derive(Debug, Clone)]
pub struct Signal {
    pub date: NaiveDate,
    pub kind: SignalKind,
    pub magnitude: Option<f64>,
}
