//! DCA buy classification.

use dca_advisor_core::config::BuyConfig;
use dca_advisor_core::market::MarketSnapshot;
use dca_advisor_core::signal::{BuyAction, BuySignal};
use dca_advisor_core::traits::{EvaluationContext, Strategy};

/// Classifies one market snapshot into exactly one buy action.
///
/// First match wins:
/// 1. RSI above `rsi_overbought` skips the buy entirely.
/// 2. Price below `ma7 * ma_dip_threshold` or a 7-day drop at or past
///    `weekly_drop_threshold` is a TURBO_BUY (both conditions are checked
///    independently and each contributes its own reason).
/// 3. RSI below `rsi_oversold` is an EXTRA_BUY.
/// 4. Otherwise a NORMAL_DCA at the base amount.
pub struct BuyClassifier {
    config: BuyConfig,
}

impl BuyClassifier {
    #[must_use]
    pub const fn new(config: BuyConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn classify(&self, snapshot: &MarketSnapshot) -> BuySignal {
        if snapshot.rsi > self.config.rsi_overbought {
            return self.signal(
                BuyAction::Skip,
                vec![format!(
                    "RSI overbought ({} > {})",
                    snapshot.rsi, self.config.rsi_overbought
                )],
                snapshot,
            );
        }

        let mut turbo_reasons = Vec::new();
        let dip_boundary = snapshot.ma7 * self.config.ma_dip_threshold;
        if snapshot.price < dip_boundary {
            turbo_reasons.push(format!(
                "Price ${} below dip boundary ${} ({} of MA7)",
                snapshot.price, dip_boundary, self.config.ma_dip_threshold
            ));
        }
        if snapshot.pct_change_7d <= self.config.weekly_drop_threshold {
            turbo_reasons.push(format!("Sharp weekly drop: {}%", snapshot.pct_change_7d));
        }
        if !turbo_reasons.is_empty() {
            return self.signal(BuyAction::TurboBuy, turbo_reasons, snapshot);
        }

        if snapshot.rsi < self.config.rsi_oversold {
            return self.signal(
                BuyAction::ExtraBuy,
                vec![format!(
                    "RSI oversold ({} < {})",
                    snapshot.rsi, self.config.rsi_oversold
                )],
                snapshot,
            );
        }

        self.signal(
            BuyAction::NormalDca,
            vec!["Normal market conditions".to_string()],
            snapshot,
        )
    }

    fn signal(&self, action: BuyAction, reasons: Vec<String>, snapshot: &MarketSnapshot) -> BuySignal {
        let multiplier = self.config.multiplier_for(action);
        BuySignal {
            action,
            multiplier,
            suggested_amount: self.config.base_amount_usd * multiplier,
            reasons,
            snapshot: snapshot.clone(),
        }
    }
}

impl Strategy for BuyClassifier {
    type Signal = BuySignal;

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> BuySignal {
        self.classify(ctx.snapshot)
    }

    fn name(&self) -> &str {
        "dca-buy"
    }
}
