//! Threshold classification for a single indicator.

use dca_advisor_core::signal::{Indicator, RiskLevel, Thresholds};
use rust_decimal::Decimal;

pub struct IndicatorEvaluator;

impl IndicatorEvaluator {
    /// Classifies a value by the highest threshold it meets or exceeds:
    /// `value >= critical` is CRITICAL, else `>= danger` is DANGER, else
    /// `>= warning` is WARNING, else SAFE.
    ///
    /// An absent input metric must cause the caller to omit the indicator
    /// entirely; this never synthesizes a SAFE reading for missing data.
    #[must_use]
    pub fn evaluate(name: &str, value: Decimal, thresholds: Thresholds) -> Indicator {
        let level = if value >= thresholds.critical {
            RiskLevel::Critical
        } else if value >= thresholds.danger {
            RiskLevel::Danger
        } else if value >= thresholds.warning {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        };

        Indicator {
            name: name.to_string(),
            value,
            level,
            thresholds,
        }
    }
}
