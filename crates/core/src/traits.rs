//! Collaborator seams and the strategy capability.
//!
//! The decision engine never fetches, formats, or persists anything
//! itself; these traits are the contracts its collaborators implement.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::market::MarketSnapshot;
use crate::position::{Position, SaleRecord};
use crate::signal::{BuySignal, SellSignal};

/// Supplies market data. Implementations own fetching, caching, and retry.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Builds a snapshot for one evaluation. `include_onchain` requests the
    /// optional MVRV/NUPL/Mayer/Fear&Greed fields used by the sell path;
    /// any the provider cannot supply stay `None`.
    async fn market_snapshot(&self, include_onchain: bool) -> Result<MarketSnapshot>;

    /// Daily closing prices, consecutive calendar days, most recent last.
    async fn daily_closes(&self, days: u32) -> Result<Vec<Decimal>>;
}

/// Durable storage for the position, signals, and sale history. The core
/// defines this logical schema; the storage technology is the
/// implementation's business.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn load_position(&self) -> Result<Option<Position>>;
    async fn store_position(&self, position: &Position) -> Result<()>;

    /// Persists a signal and returns its assigned id.
    async fn save_buy_signal(&self, signal: &BuySignal) -> Result<i64>;
    async fn save_sell_signal(&self, signal: &SellSignal) -> Result<i64>;

    async fn mark_notified(&self, signal_id: i64) -> Result<()>;
    async fn mark_executed(&self, signal_id: i64) -> Result<()>;

    async fn append_sale(&self, sale: &SaleRecord) -> Result<()>;

    /// Discards all signals and sale history. Used only by the ledger reset.
    async fn clear_history(&self) -> Result<()>;
}

/// Receives structured signals for delivery. Implementations own message
/// formatting, transport, and retry; the core only hands over the data.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_buy(&self, signal: &BuySignal) -> Result<()>;
    async fn notify_sell(&self, signal: &SellSignal, position: &Position) -> Result<()>;
}

/// Everything a strategy may consult for one evaluation. The buy path
/// ignores the daily closes; the sell path consumes all three.
pub struct EvaluationContext<'a> {
    pub snapshot: &'a MarketSnapshot,
    pub position: &'a Position,
    /// Read-only for the duration of the evaluation.
    pub daily_closes: &'a [Decimal],
}

/// A decision strategy producing one signal per evaluation.
///
/// Evaluation is synchronous and pure: identical context yields an
/// identical signal. The associated type ties each strategy to the signal
/// variant it produces instead of relying on structural typing.
pub trait Strategy {
    type Signal;

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Self::Signal;

    fn name(&self) -> &str;
}
