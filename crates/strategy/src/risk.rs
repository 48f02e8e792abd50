//! Aggregate risk scoring over a set of evaluated indicators.

use dca_advisor_core::signal::{Indicator, RiskLevel};

/// Tally of triggered indicators by severity. SAFE readings never count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub warning: usize,
    pub danger: usize,
    pub critical: usize,
}

impl SignalCounts {
    #[must_use]
    pub fn tally(indicators: &[Indicator]) -> Self {
        let mut counts = Self::default();
        for indicator in indicators {
            match indicator.level {
                RiskLevel::Safe => {}
                RiskLevel::Warning => counts.warning += 1,
                RiskLevel::Danger => counts.danger += 1,
                RiskLevel::Critical => counts.critical += 1,
            }
        }
        counts
    }

    /// Total number of triggered indicators across all severities.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.warning + self.danger + self.critical
    }
}

/// Weighted risk score: 10 per WARNING, 25 per DANGER, 40 per CRITICAL,
/// plus a flat 30 when the Pi Cycle crossover fires, capped at 100.
pub struct RiskScorer;

impl RiskScorer {
    const WARNING_WEIGHT: usize = 10;
    const DANGER_WEIGHT: usize = 25;
    const CRITICAL_WEIGHT: usize = 40;
    const PI_CYCLE_WEIGHT: usize = 30;

    #[must_use]
    pub fn score(counts: SignalCounts, pi_cycle_triggered: bool) -> u8 {
        let mut score = counts.warning * Self::WARNING_WEIGHT
            + counts.danger * Self::DANGER_WEIGHT
            + counts.critical * Self::CRITICAL_WEIGHT;
        if pi_cycle_triggered {
            score += Self::PI_CYCLE_WEIGHT;
        }
        score.min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dca_advisor_core::signal::Thresholds;
    use rust_decimal_macros::dec;

    fn indicator(level: RiskLevel) -> Indicator {
        Indicator {
            name: "MVRV Z-Score".to_string(),
            value: dec!(4),
            level,
            thresholds: Thresholds::new(dec!(3), dec!(5), dec!(7)),
        }
    }

    #[test]
    fn tally_ignores_safe() {
        let indicators = vec![
            indicator(RiskLevel::Safe),
            indicator(RiskLevel::Warning),
            indicator(RiskLevel::Danger),
            indicator(RiskLevel::Critical),
            indicator(RiskLevel::Critical),
        ];
        let counts = SignalCounts::tally(&indicators);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.danger, 1);
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn empty_set_scores_zero() {
        assert_eq!(RiskScorer::score(SignalCounts::default(), false), 0);
    }

    #[test]
    fn weights_sum() {
        let counts = SignalCounts {
            warning: 2,
            danger: 1,
            critical: 1,
        };
        // 2*10 + 25 + 40 = 85
        assert_eq!(RiskScorer::score(counts, false), 85);
    }

    #[test]
    fn pi_cycle_adds_thirty() {
        let counts = SignalCounts {
            warning: 1,
            ..SignalCounts::default()
        };
        assert_eq!(RiskScorer::score(counts, true), 40);
        assert_eq!(RiskScorer::score(SignalCounts::default(), true), 30);
    }

    #[test]
    fn score_caps_at_100() {
        let counts = SignalCounts {
            warning: 0,
            danger: 0,
            critical: 5,
        };
        assert_eq!(RiskScorer::score(counts, true), 100);
    }

    #[test]
    fn score_is_monotone_in_severity() {
        // Upgrading one indicator's severity never lowers the score.
        let warning_only = SignalCounts {
            warning: 1,
            ..SignalCounts::default()
        };
        let danger_only = SignalCounts {
            danger: 1,
            ..SignalCounts::default()
        };
        let critical_only = SignalCounts {
            critical: 1,
            ..SignalCounts::default()
        };
        let w = RiskScorer::score(warning_only, false);
        let d = RiskScorer::score(danger_only, false);
        let c = RiskScorer::score(critical_only, false);
        assert!(w < d && d < c);
    }
}
