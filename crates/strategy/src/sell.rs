//! Sell recommendation over on-chain, technical, and sentiment indicators.

use dca_advisor_core::config::SellConfig;
use dca_advisor_core::market::MarketSnapshot;
use dca_advisor_core::position::Position;
use dca_advisor_core::signal::{Indicator, RiskLevel, SellAction, SellSignal, Thresholds};
use dca_advisor_core::traits::{EvaluationContext, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::indicator::IndicatorEvaluator;
use crate::pi_cycle::PiCycleDetector;
use crate::risk::{RiskScorer, SignalCounts};

/// Fear & Greed bands are fixed rather than tuned per asset.
const FEAR_GREED_THRESHOLDS: Thresholds = Thresholds {
    warning: dec!(65),
    danger: dec!(75),
    critical: dec!(85),
};

/// Composes the indicator evaluator, Pi Cycle detector, and risk scorer
/// into a SELL/ALERT/HOLD recommendation with a tiered sell percentage.
///
/// The sell percentage and the SELL/ALERT/HOLD classification are computed
/// independently: the percentage follows severity floors while the
/// classification follows triggered-signal counts, so a single CRITICAL
/// indicator can recommend a 25% sale while still classifying as ALERT.
pub struct SellRecommender {
    config: SellConfig,
    pi_cycle: PiCycleDetector,
}

impl SellRecommender {
    #[must_use]
    pub fn new(config: SellConfig) -> Self {
        Self {
            config,
            pi_cycle: PiCycleDetector::default(),
        }
    }

    #[must_use]
    pub fn recommend(
        &self,
        snapshot: &MarketSnapshot,
        position: &Position,
        daily_closes: &[Decimal],
    ) -> SellSignal {
        let indicators = self.evaluate_indicators(snapshot);
        let counts = SignalCounts::tally(&indicators);
        let pi_cycle_triggered = self.pi_cycle.detect(daily_closes);
        let risk_score = RiskScorer::score(counts, pi_cycle_triggered);

        let mut reasons = Vec::new();
        let mut sell_pct = Decimal::ZERO;

        if pi_cycle_triggered {
            sell_pct = sell_pct.max(self.config.pi_cycle_tier);
            reasons.push("PI CYCLE TOP - historical market-top crossover".to_string());
        }

        for indicator in &indicators {
            match indicator.level {
                RiskLevel::Critical => {
                    sell_pct = sell_pct.max(self.config.tier_3);
                    reasons.push(format!(
                        "{}: {} CRITICAL (>{})",
                        indicator.name, indicator.value, indicator.thresholds.critical
                    ));
                }
                RiskLevel::Danger => {
                    sell_pct = sell_pct.max(self.config.tier_2);
                    reasons.push(format!(
                        "{}: {} DANGER (>{})",
                        indicator.name, indicator.value, indicator.thresholds.danger
                    ));
                }
                RiskLevel::Warning if sell_pct.is_zero() => {
                    sell_pct = self.config.tier_1;
                    reasons.push(format!(
                        "{}: {} WARNING (>{})",
                        indicator.name, indicator.value, indicator.thresholds.warning
                    ));
                }
                RiskLevel::Warning | RiskLevel::Safe => {}
            }
        }

        let sell_amount_btc = position.remaining_btc() * sell_pct;
        let sell_amount_usd = sell_amount_btc * snapshot.price;

        let action = if counts.total() >= self.config.min_signals_to_sell || pi_cycle_triggered {
            SellAction::Sell
        } else if counts.total() >= self.config.min_signals_to_alert {
            SellAction::Alert
        } else {
            reasons = vec!["All indicators in the safe zone".to_string()];
            SellAction::Hold
        };

        SellSignal {
            action,
            risk_score,
            sell_percentage: sell_pct,
            sell_amount_btc,
            sell_amount_usd,
            reasons,
            indicators,
            pi_cycle_triggered,
            snapshot: snapshot.clone(),
        }
    }

    /// Builds the indicator list in a fixed order. Optional metrics are
    /// omitted when absent; daily RSI is mandatory and always evaluated.
    fn evaluate_indicators(&self, snapshot: &MarketSnapshot) -> Vec<Indicator> {
        let mut indicators = Vec::with_capacity(5);

        if let Some(mvrv) = snapshot.mvrv_zscore {
            indicators.push(IndicatorEvaluator::evaluate(
                "MVRV Z-Score",
                mvrv,
                self.config.mvrv,
            ));
        }
        if let Some(nupl) = snapshot.nupl {
            indicators.push(IndicatorEvaluator::evaluate("NUPL", nupl, self.config.nupl));
        }
        indicators.push(IndicatorEvaluator::evaluate(
            "RSI (Daily)",
            snapshot.rsi,
            self.config.rsi,
        ));
        if let Some(mayer) = snapshot.mayer_multiple {
            indicators.push(IndicatorEvaluator::evaluate(
                "Mayer Multiple",
                mayer,
                self.config.mayer,
            ));
        }
        if let Some(fear_greed) = snapshot.fear_greed_index {
            indicators.push(IndicatorEvaluator::evaluate(
                "Fear & Greed",
                Decimal::from(fear_greed),
                FEAR_GREED_THRESHOLDS,
            ));
        }

        indicators
    }
}

impl Strategy for SellRecommender {
    type Signal = SellSignal;

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> SellSignal {
        self.recommend(ctx.snapshot, ctx.position, ctx.daily_closes)
    }

    fn name(&self) -> &str {
        "dca-sell"
    }
}
