//! Typed configuration for the advisor.
//!
//! Every value here is overridable at the boundary (file or environment via
//! [`crate::ConfigLoader`]); the defaults mirror the battle-tested values
//! the strategies were tuned with. Components receive these structs
//! explicitly — nothing in the core reads configuration sources itself.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::signal::{BuyAction, Thresholds};

/// Buy-side strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyConfig {
    /// Base DCA amount in USD before any multiplier.
    pub base_amount_usd: Decimal,
    pub rsi_oversold: Decimal,
    pub rsi_overbought: Decimal,
    /// Price below `ma7 * ma_dip_threshold` counts as a dip (0.97 = 3% under MA7).
    pub ma_dip_threshold: Decimal,
    /// 7-day percent change at or below this triggers the weekly-drop buy.
    pub weekly_drop_threshold: Decimal,
    pub turbo_multiplier: Decimal,
    pub extra_multiplier: Decimal,
    pub normal_multiplier: Decimal,
}

impl Default for BuyConfig {
    fn default() -> Self {
        Self {
            base_amount_usd: dec!(100),
            rsi_oversold: dec!(35),
            rsi_overbought: dec!(70),
            ma_dip_threshold: dec!(0.97),
            weekly_drop_threshold: dec!(-3.0),
            turbo_multiplier: dec!(1.6),
            extra_multiplier: dec!(1.3),
            normal_multiplier: dec!(1.0),
        }
    }
}

impl BuyConfig {
    /// Fixed amount multiplier for a buy action. SKIP is always zero.
    #[must_use]
    pub fn multiplier_for(&self, action: BuyAction) -> Decimal {
        match action {
            BuyAction::TurboBuy => self.turbo_multiplier,
            BuyAction::ExtraBuy => self.extra_multiplier,
            BuyAction::NormalDca => self.normal_multiplier,
            BuyAction::Skip => Decimal::ZERO,
        }
    }
}

/// Sell-side thresholds and tiered-sell parameters.
///
/// Fear & Greed thresholds are intentionally absent: they are fixed in the
/// recommender rather than tuned per asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellConfig {
    pub mvrv: Thresholds,
    pub nupl: Thresholds,
    pub rsi: Thresholds,
    pub mayer: Thresholds,

    /// Sell fraction when the highest severity is WARNING.
    pub tier_1: Decimal,
    /// Sell fraction when the highest severity is DANGER.
    pub tier_2: Decimal,
    /// Sell fraction when any indicator is CRITICAL.
    pub tier_3: Decimal,
    /// Sell fraction floor when the Pi Cycle crossover fires.
    pub pi_cycle_tier: Decimal,

    /// Triggered-indicator count that upgrades HOLD to ALERT.
    pub min_signals_to_alert: usize,
    /// Triggered-indicator count that upgrades to SELL (Pi Cycle bypasses this).
    pub min_signals_to_sell: usize,
}

impl Default for SellConfig {
    fn default() -> Self {
        Self {
            mvrv: Thresholds::new(dec!(3.0), dec!(5.0), dec!(7.0)),
            nupl: Thresholds::new(dec!(0.5), dec!(0.65), dec!(0.75)),
            rsi: Thresholds::new(dec!(70), dec!(80), dec!(88)),
            mayer: Thresholds::new(dec!(1.5), dec!(2.0), dec!(2.4)),
            tier_1: dec!(0.10),
            tier_2: dec!(0.15),
            tier_3: dec!(0.25),
            pi_cycle_tier: dec!(0.25),
            min_signals_to_alert: 1,
            min_signals_to_sell: 2,
        }
    }
}

/// Defaults used when the ledger creates a position for the first time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionConfig {
    pub total_btc: Decimal,
    pub cost_basis_usd: Decimal,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            total_btc: dec!(0.5),
            cost_basis_usd: dec!(25000),
        }
    }
}

/// Top-level advisor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub buy: BuyConfig,
    #[serde(default)]
    pub sell: SellConfig,
    #[serde(default)]
    pub position: PositionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_defaults_match_tuned_values() {
        let config = BuyConfig::default();
        assert_eq!(config.base_amount_usd, dec!(100));
        assert_eq!(config.ma_dip_threshold, dec!(0.97));
        assert_eq!(config.multiplier_for(BuyAction::TurboBuy), dec!(1.6));
        assert_eq!(config.multiplier_for(BuyAction::Skip), Decimal::ZERO);
    }

    #[test]
    fn sell_defaults_have_ascending_thresholds() {
        let config = SellConfig::default();
        for t in [&config.mvrv, &config.nupl, &config.rsi, &config.mayer] {
            assert!(t.warning < t.danger && t.danger < t.critical);
        }
        assert_eq!(config.tier_3, config.pi_cycle_tier);
    }

    #[test]
    fn advisor_config_roundtrips_through_serde() {
        let config = AdvisorConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        let parsed: AdvisorConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, config);
    }
}
