//! Signal and indicator types shared by the buy and sell strategies.
//!
//! Everything here is immutable once created: a strategy evaluation builds
//! one signal from one market snapshot and never mutates it afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market::MarketSnapshot;

/// Risk level for a single indicator, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
    Critical,
}

impl RiskLevel {
    /// Returns true if this level contributes to the triggered-signal count.
    #[must_use]
    pub const fn is_triggered(self) -> bool {
        !matches!(self, Self::Safe)
    }
}

/// Ascending classification thresholds for one indicator.
///
/// Callers are responsible for `warning < danger < critical`; non-monotonic
/// thresholds are a misconfiguration, not a runtime failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warning: Decimal,
    pub danger: Decimal,
    pub critical: Decimal,
}

impl Thresholds {
    #[must_use]
    pub const fn new(warning: Decimal, danger: Decimal, critical: Decimal) -> Self {
        Self {
            warning,
            danger,
            critical,
        }
    }
}

/// A single evaluated indicator with the thresholds used to classify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub value: Decimal,
    pub level: RiskLevel,
    pub thresholds: Thresholds,
}

/// Buy-side action produced by the classifier. Exactly one per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuyAction {
    TurboBuy,
    ExtraBuy,
    NormalDca,
    Skip,
}

/// Sell-side recommendation produced by the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellAction {
    Sell,
    Alert,
    Hold,
}

/// Buy recommendation for one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuySignal {
    pub action: BuyAction,
    /// Fixed multiplier for the action (0 for SKIP).
    pub multiplier: Decimal,
    /// `base_amount_usd * multiplier`.
    pub suggested_amount: Decimal,
    /// One human-readable line per triggered condition, in trigger order.
    pub reasons: Vec<String>,
    /// The snapshot this signal was derived from.
    pub snapshot: MarketSnapshot,
}

/// Sell recommendation for one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellSignal {
    pub action: SellAction,
    /// Aggregate risk score in [0, 100].
    pub risk_score: u8,
    /// Fraction of remaining holdings recommended for sale, in [0, 1].
    pub sell_percentage: Decimal,
    pub sell_amount_btc: Decimal,
    pub sell_amount_usd: Decimal,
    /// One severity-tagged line per triggering indicator or condition.
    pub reasons: Vec<String>,
    /// Every indicator that was evaluated, including SAFE ones.
    pub indicators: Vec<Indicator>,
    pub pi_cycle_triggered: bool,
    pub snapshot: MarketSnapshot,
}
