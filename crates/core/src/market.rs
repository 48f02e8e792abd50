//! Market snapshot consumed by both strategies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One immutable view of the market at evaluation time.
///
/// All technical fields are derived from a single aligned daily price
/// series; `timestamp` is the evaluation instant, not the series date.
/// On-chain and sentiment fields are optional: when a collaborator cannot
/// supply one, the sell recommender omits that indicator entirely rather
/// than substituting a SAFE reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price: Decimal,
    pub ma7: Decimal,
    pub ma21: Decimal,
    pub ma200: Option<Decimal>,
    pub pct_change_24h: Decimal,
    pub pct_change_7d: Decimal,
    /// 14-period daily RSI. Always present; both strategies require it.
    pub rsi: Decimal,
    pub timestamp: DateTime<Utc>,

    pub mvrv_zscore: Option<Decimal>,
    pub nupl: Option<Decimal>,
    pub mayer_multiple: Option<Decimal>,
    /// Fear & Greed index in [0, 100].
    pub fear_greed_index: Option<u8>,
}
