//! Pi Cycle Top detection.
//!
//! The 111-day SMA crossing above twice the 350-day SMA has historically
//! marked cycle tops within days. The detector also fires early when the
//! two curves are within 2% of crossing, so a notification lands before
//! the top rather than after it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::series::rolling_sma;

#[derive(Debug, Clone)]
pub struct PiCycleDetector {
    short_period: usize,
    long_period: usize,
    /// How many of the most recent days to scan for an upward crossing.
    lookback_days: usize,
    /// Relative gap under which the near-cross early warning fires.
    early_warning_gap: Decimal,
}

impl Default for PiCycleDetector {
    fn default() -> Self {
        Self {
            short_period: 111,
            long_period: 350,
            lookback_days: 3,
            early_warning_gap: dec!(0.02),
        }
    }
}

impl PiCycleDetector {
    /// Returns true when the short SMA crossed up through 2x the long SMA
    /// within the lookback window, or when the current relative gap
    /// `(2*MA350 - MA111) / (2*MA350)` is under the early-warning margin.
    ///
    /// A series shorter than the long period returns false: an
    /// unevaluable series is indistinguishable from "no signal" by
    /// design, so callers degrade gracefully instead of failing the
    /// whole recommendation.
    #[must_use]
    pub fn detect(&self, daily_closes: &[Decimal]) -> bool {
        if daily_closes.len() < self.long_period {
            return false;
        }

        let short = rolling_sma(daily_closes, self.short_period);
        let long_x2: Vec<Option<Decimal>> = rolling_sma(daily_closes, self.long_period)
            .into_iter()
            .map(|value| value.map(|v| v * dec!(2)))
            .collect();

        let n = daily_closes.len();
        let start = n.saturating_sub(self.lookback_days).max(1);
        for i in start..n {
            if let (Some(s), Some(l), Some(prev_s), Some(prev_l)) =
                (short[i], long_x2[i], short[i - 1], long_x2[i - 1])
            {
                if s >= l && prev_s < prev_l {
                    return true;
                }
            }
        }

        match (short[n - 1], long_x2[n - 1]) {
            (Some(s), Some(l)) if l > Decimal::ZERO => (l - s) / l < self.early_warning_gap,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `base_days` closes at 100 followed by `spike_days` at 2000. With
    /// this shape the 111-SMA first reaches 2x the 350-SMA on the 16th
    /// spike day.
    fn spiked_series(base_days: usize, spike_days: usize) -> Vec<Decimal> {
        let mut closes = vec![Decimal::from(100); base_days];
        closes.extend(std::iter::repeat(Decimal::from(2000)).take(spike_days));
        closes
    }

    #[test]
    fn short_series_never_fires() {
        let detector = PiCycleDetector::default();
        assert!(!detector.detect(&vec![Decimal::from(100); 349]));
        assert!(!detector.detect(&[]));
    }

    #[test]
    fn flat_series_does_not_fire() {
        // Constant price: 111-SMA sits at half of 2x the 350-SMA, gap 50%.
        let detector = PiCycleDetector::default();
        assert!(!detector.detect(&vec![Decimal::from(100); 400]));
    }

    #[test]
    fn upward_crossing_on_last_day_fires() {
        let detector = PiCycleDetector::default();
        assert!(detector.detect(&spiked_series(400, 16)));
    }

    #[test]
    fn crossing_within_lookback_fires() {
        let detector = PiCycleDetector::default();
        assert!(detector.detect(&spiked_series(400, 18)));
    }

    #[test]
    fn near_cross_fires_early_warning() {
        // 15 spike days: just below the crossing, gap around 1.7%.
        let detector = PiCycleDetector::default();
        assert!(detector.detect(&spiked_series(400, 15)));
    }

    #[test]
    fn wide_gap_does_not_fire() {
        // 10 spike days: gap still above 10%.
        let detector = PiCycleDetector::default();
        assert!(!detector.detect(&spiked_series(400, 10)));
    }

    #[test]
    fn old_crossing_still_flags_while_above() {
        // Crossed five days ago and still above: the gap is negative,
        // which the early warning treats as "at or past the cross".
        let detector = PiCycleDetector::default();
        assert!(detector.detect(&spiked_series(400, 21)));
    }
}
