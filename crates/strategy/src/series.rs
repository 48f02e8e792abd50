//! Derivations over a daily close series.
//!
//! Pure helpers shared by the detectors and usable by providers to fill a
//! snapshot from raw closes. The statistical MVRV/NUPL estimators work in
//! f64 internally and convert at the edge; everything price-shaped stays
//! in `Decimal`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rolling simple moving average. Index `i` is `Some` once a full window
/// ending at `i` exists, i.e. from `period - 1` on.
#[must_use]
pub fn rolling_sma(closes: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    if period == 0 || closes.len() < period {
        return vec![None; closes.len()];
    }

    let mut out = vec![None; closes.len()];
    let mut window_sum: Decimal = closes[..period].iter().sum();
    let divisor = Decimal::from(period);
    out[period - 1] = Some(window_sum / divisor);

    for i in period..closes.len() {
        window_sum += closes[i] - closes[i - period];
        out[i] = Some(window_sum / divisor);
    }
    out
}

/// Simple moving average of the most recent `period` closes.
#[must_use]
pub fn sma(closes: &[Decimal], period: usize) -> Option<Decimal> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    let sum: Decimal = window.iter().sum();
    Some(sum / Decimal::from(period))
}

/// Relative Strength Index over the most recent `period` deltas, using
/// plain rolling means of gains and losses.
///
/// Returns `None` with fewer than `period + 1` closes or when the window
/// is completely flat (no gains and no losses).
#[must_use]
pub fn rsi(closes: &[Decimal], period: usize) -> Option<Decimal> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let deltas = &closes[closes.len() - period - 1..];
    let mut gains = Decimal::ZERO;
    let mut losses = Decimal::ZERO;
    for pair in deltas.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > Decimal::ZERO {
            gains += delta;
        } else {
            losses -= delta;
        }
    }

    if losses.is_zero() {
        if gains.is_zero() {
            return None;
        }
        return Some(dec!(100));
    }

    let rs = gains / losses;
    Some(dec!(100) - dec!(100) / (Decimal::ONE + rs))
}

/// Mayer Multiple: price over its 200-day moving average. Degrades to 1
/// when the average is not positive.
#[must_use]
pub fn mayer_multiple(price: Decimal, ma200: Decimal) -> Decimal {
    if ma200 > Decimal::ZERO {
        price / ma200
    } else {
        Decimal::ONE
    }
}

/// Estimates an MVRV Z-Score from the price's deviation over the series
/// mean, clamped to [0, 10]. Falls back to 1 with under 200 closes.
#[must_use]
pub fn estimate_mvrv_zscore(price: Decimal, closes: &[Decimal]) -> Decimal {
    if closes.len() < 200 {
        return Decimal::ONE;
    }

    let values: Vec<f64> = closes.iter().filter_map(Decimal::to_f64).collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let z_score = if std_dev > 0.0 {
        (price.to_f64().unwrap_or(mean) - mean) / std_dev
    } else {
        0.0
    };
    let estimate = (z_score * 1.5 + 2.0).clamp(0.0, 10.0);
    Decimal::from_f64(estimate).unwrap_or(Decimal::ONE)
}

/// Estimates NUPL from the fraction of days the series closed below the
/// current price, clamped to [-1, 1]. Falls back to 0.5 with under 100
/// closes.
#[must_use]
pub fn estimate_nupl(price: Decimal, closes: &[Decimal]) -> Decimal {
    if closes.len() < 100 {
        return dec!(0.5);
    }

    let days_in_profit = closes.iter().filter(|close| **close < price).count();
    let fraction = days_in_profit as f64 / closes.len() as f64;
    let estimate = ((fraction - 0.5) * 1.5).clamp(-1.0, 1.0);
    Decimal::from_f64(estimate).unwrap_or(Decimal::ZERO)
}
