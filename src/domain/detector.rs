//! Signal detection: single forward scan per kind over computed series.
//!
//! All detectors are edge-triggered and append-only: a signal fires on the
//! bar where a condition starts holding, never again while it keeps
//! holding, and is never revised afterwards.

use crate::domain::series::Series;
use crate::domain::signal::{Signal, SignalKind};

/// Crossing detector over two date-aligned series.
///
/// Compares the sign of `a - b` bar to bar wherever both series are
/// defined. A flip from negative to positive emits `bullish`, positive to
/// negative emits `bearish`. Exact equality carries the previous sign
/// forward, so flat pairs never oscillate. Magnitude is the gap `|a - b|`
/// on the crossing bar.
pub fn detect_cross(
    a: &Series,
    b: &Series,
    bullish: SignalKind,
    bearish: SignalKind,
) -> Vec<Signal> {
    debug_assert_eq!(a.len(), b.len());

    let mut signals = Vec::new();
    let mut prev_sign: Option<i8> = None;

    for i in 0..a.len().min(b.len()) {
        let (Some(va), Some(vb)) = (a.value(i), b.value(i)) else {
            continue;
        };
        let diff = va - vb;
        let sign: i8 = if diff > 0.0 {
            1
        } else if diff < 0.0 {
            -1
        } else {
            // tie: keep the previous sign
            match prev_sign {
                Some(s) => s,
                None => continue,
            }
        };

        if let Some(prev) = prev_sign {
            if prev < 0 && sign > 0 {
                signals.push(Signal {
                    date: a.points[i].date,
                    kind: bullish,
                    magnitude: Some(diff.abs()),
                });
            } else if prev > 0 && sign < 0 {
                signals.push(Signal {
                    date: a.points[i].date,
                    kind: bearish,
                    magnitude: Some(diff.abs()),
                });
            }
        }
        prev_sign = Some(sign);
    }

    signals
}

/// Threshold detector for the RSI: one signal per crossing into the
/// overbought/oversold zone, not one per bar spent there.
pub fn detect_rsi_thresholds(rsi: &Series, overbought: f64, oversold: f64) -> Vec<Signal> {
    let mut signals = Vec::new();
    let mut prev: Option<f64> = None;

    for p in &rsi.points {
        let Some(v) = p.value else { continue };
        if let Some(prev_v) = prev {
            if prev_v <= overbought && v > overbought {
                signals.push(Signal {
                    date: p.date,
                    kind: SignalKind::RsiOverbought,
                    magnitude: Some(v),
                });
            } else if prev_v >= oversold && v < oversold {
                signals.push(Signal {
                    date: p.date,
                    kind: SignalKind::RsiOversold,
                    magnitude: Some(v),
                });
            }
        }
        prev = Some(v);
    }

    signals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CombinedState {
    Buy,
    Sell,
    Neutral,
}

/// Decision-tree combiner over the price and volume first derivatives.
///
/// Rising price on rising volume is a confirmed uptrend (buy); falling
/// price on rising volume is a confirmed downtrend (sell); anything else,
/// including derivatives within ±`dead_band`, is neutral. Emits one signal
/// when the combined state changes into buy or sell.
pub fn detect_combined(
    price_deriv: &Series,
    volume_deriv: &Series,
    dead_band: f64,
) -> Vec<Signal> {
    debug_assert_eq!(price_deriv.len(), volume_deriv.len());

    let mut signals = Vec::new();
    let mut prev_state = CombinedState::Neutral;

    for i in 0..price_deriv.len().min(volume_deriv.len()) {
        let (Some(pd), Some(vd)) = (price_deriv.value(i), volume_deriv.value(i)) else {
            continue;
        };

        let price_up = pd > dead_band;
        let price_down = pd < -dead_band;
        let volume_up = vd > dead_band;

        let state = if price_up && volume_up {
            CombinedState::Buy
        } else if price_down && volume_up {
            CombinedState::Sell
        } else {
            CombinedState::Neutral
        };

        if state != prev_state {
            match state {
                CombinedState::Buy => signals.push(Signal {
                    date: price_deriv.points[i].date,
                    kind: SignalKind::CombinedBuy,
                    magnitude: Some(pd),
                }),
                CombinedState::Sell => signals.push(Signal {
                    date: price_deriv.points[i].date,
                    kind: SignalKind::CombinedSell,
                    magnitude: Some(pd),
                }),
                CombinedState::Neutral => {}
            }
        }
        prev_state = state;
    }

    signals
}
