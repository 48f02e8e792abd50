//! End-to-end strategy flow: derive a snapshot from a raw daily close
//! series with the series helpers, then run both strategies through the
//! `Strategy` seam the way the engine drives them.

use chrono::Utc;
use dca_advisor_core::config::{BuyConfig, SellConfig};
use dca_advisor_core::market::MarketSnapshot;
use dca_advisor_core::position::Position;
use dca_advisor_core::signal::{BuyAction, RiskLevel, SellAction};
use dca_advisor_core::traits::{EvaluationContext, Strategy};
use dca_advisor_strategy::series;
use dca_advisor_strategy::{BuyClassifier, SellRecommender};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a snapshot from a close series the way a data provider would,
/// using the shared derivations for every technical field.
fn snapshot_from_series(closes: &[Decimal], fear_greed_index: Option<u8>) -> MarketSnapshot {
    let price = *closes.last().unwrap();
    let pct_change = |days_back: usize| {
        let prior = closes[closes.len() - 1 - days_back];
        (price - prior) / prior * dec!(100)
    };
    let ma200 = series::sma(closes, 200);

    MarketSnapshot {
        price,
        ma7: series::sma(closes, 7).unwrap(),
        ma21: series::sma(closes, 21).unwrap(),
        ma200,
        pct_change_24h: pct_change(1),
        pct_change_7d: pct_change(7),
        rsi: series::rsi(closes, 14).unwrap(),
        timestamp: Utc::now(),
        mvrv_zscore: Some(series::estimate_mvrv_zscore(price, closes)),
        nupl: Some(series::estimate_nupl(price, closes)),
        mayer_multiple: ma200.map(|ma| series::mayer_multiple(price, ma)),
        fear_greed_index,
    }
}

/// 400 days at 100, then 16 days climbing from 2000. Steep enough to put
/// every indicator in a triggered band and cross the Pi Cycle SMAs.
fn blow_off_top_series() -> Vec<Decimal> {
    let mut closes = vec![Decimal::from(100); 400];
    closes.extend((0..16).map(|i| Decimal::from(2000 + i)));
    closes
}

/// Alternating 100/101 closes: every derivation lands in the safe zone.
fn sideways_series() -> Vec<Decimal> {
    (0..400)
        .map(|i| Decimal::from(if i % 2 == 0 { 101 } else { 100 }))
        .collect()
}

#[test]
fn blow_off_top_recommends_sell() {
    let closes = blow_off_top_series();
    let snapshot = snapshot_from_series(&closes, Some(92));
    let position = Position::new(dec!(0.5), dec!(25000));

    let recommender = SellRecommender::new(SellConfig::default());
    let ctx = EvaluationContext {
        snapshot: &snapshot,
        position: &position,
        daily_closes: &closes,
    };
    let signal = recommender.evaluate(&ctx);

    assert_eq!(signal.action, SellAction::Sell);
    assert!(signal.pi_cycle_triggered);
    assert_eq!(signal.risk_score, 100);
    assert_eq!(signal.sell_percentage, dec!(0.25));
    assert_eq!(signal.sell_amount_btc, dec!(0.125));
    assert_eq!(signal.sell_amount_usd, dec!(0.125) * snapshot.price);

    // All five indicators were evaluated and none stayed safe.
    assert_eq!(signal.indicators.len(), 5);
    assert!(signal.indicators.iter().all(|i| i.level.is_triggered()));
    // Fourteen straight up days pin the RSI at 100.
    assert_eq!(snapshot.rsi, dec!(100));
}

#[test]
fn sideways_market_holds_and_keeps_buying() {
    let closes = sideways_series();
    let snapshot = snapshot_from_series(&closes, None);
    let position = Position::new(dec!(0.5), dec!(25000));

    let recommender = SellRecommender::new(SellConfig::default());
    let ctx = EvaluationContext {
        snapshot: &snapshot,
        position: &position,
        daily_closes: &closes,
    };
    let sell = recommender.evaluate(&ctx);

    assert_eq!(sell.action, SellAction::Hold);
    assert_eq!(sell.risk_score, 0);
    assert!(!sell.pi_cycle_triggered);
    assert!(sell.indicators.iter().all(|i| i.level == RiskLevel::Safe));
    assert_eq!(sell.reasons, vec!["All indicators in the safe zone"]);

    // The same snapshot keeps the buy side on its normal cadence.
    let classifier = BuyClassifier::new(BuyConfig::default());
    let buy = classifier.evaluate(&ctx);
    assert_eq!(buy.action, BuyAction::NormalDca);
    assert_eq!(buy.suggested_amount, dec!(100));
}

#[test]
fn crash_after_top_turns_the_buy_side_aggressive() {
    // A 10% single-week drawdown from a flat market.
    let mut closes = vec![Decimal::from(1000); 393];
    closes.extend((1..=7).map(|i| Decimal::from(1000 - i * 15)));
    let snapshot = snapshot_from_series(&closes, None);
    let position = Position::new(dec!(0.5), dec!(25000));

    let classifier = BuyClassifier::new(BuyConfig::default());
    let ctx = EvaluationContext {
        snapshot: &snapshot,
        position: &position,
        daily_closes: &closes,
    };
    let buy = classifier.evaluate(&ctx);

    assert_eq!(buy.action, BuyAction::TurboBuy);
    assert_eq!(buy.suggested_amount, dec!(160));
    // Price under the MA7 dip boundary and a sharp weekly drop both fire.
    assert_eq!(buy.reasons.len(), 2);
}
