//! One scheduled evaluation cycle, wired end to end.
//!
//! The engine owns the collaborator handles and runs the control flow:
//! fetch a snapshot, evaluate the strategy, persist the signal, and hand
//! it to the notification sink under the gating rules. It makes no
//! decisions of its own.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::config::AdvisorConfig;
use crate::position::PositionLedger;
use crate::signal::{BuyAction, BuySignal, SellAction, SellSignal};
use crate::traits::{
    EvaluationContext, MarketDataProvider, NotificationSink, PersistenceStore, Strategy,
};

/// Days of history requested for the sell path (Pi Cycle needs 350).
const SELL_HISTORY_DAYS: u32 = 365;

/// Per-cycle flags, mirroring the scheduler's command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleOptions {
    /// Evaluate and persist, but never notify.
    pub dry_run: bool,
    /// Notify even for SKIP/HOLD outcomes.
    pub force_notify: bool,
}

pub struct AdvisorEngine<P, S, N> {
    provider: P,
    ledger: PositionLedger<S>,
    sink: N,
    config: AdvisorConfig,
}

impl<P, S, N> AdvisorEngine<P, S, N>
where
    P: MarketDataProvider,
    S: PersistenceStore,
    N: NotificationSink,
{
    pub fn new(provider: P, store: S, sink: N, config: AdvisorConfig) -> Self {
        let ledger = PositionLedger::new(store, config.position.clone());
        Self {
            provider,
            ledger,
            sink,
            config,
        }
    }

    /// The ledger handle, for recording executed sales or resetting.
    pub fn ledger_mut(&mut self) -> &mut PositionLedger<S> {
        &mut self.ledger
    }

    #[must_use]
    pub const fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Runs one buy evaluation: snapshot → classify → persist → notify
    /// (unless SKIP or dry-run).
    ///
    /// # Errors
    /// Returns an error if the provider or store fails. Sink failures are
    /// logged, not propagated: a missed notification must not lose the
    /// persisted signal.
    pub async fn run_buy_cycle<B>(&mut self, strategy: &B, opts: CycleOptions) -> Result<BuySignal>
    where
        B: Strategy<Signal = BuySignal>,
    {
        let snapshot = self.provider.market_snapshot(false).await?;
        let position = self.ledger.get_or_create().await?;

        let ctx = EvaluationContext {
            snapshot: &snapshot,
            position: &position,
            daily_closes: &[],
        };
        let signal = strategy.evaluate(&ctx);
        let signal_id = self.ledger.store().save_buy_signal(&signal).await?;

        tracing::info!(
            strategy = strategy.name(),
            signal_id,
            action = ?signal.action,
            suggested_amount = %signal.suggested_amount,
            "buy cycle evaluated"
        );

        let should_notify = signal.action != BuyAction::Skip || opts.force_notify;
        if opts.dry_run {
            tracing::info!(signal_id, "dry run: notification suppressed");
        } else if should_notify {
            match self.sink.notify_buy(&signal).await {
                Ok(()) => self.ledger.store().mark_notified(signal_id).await?,
                Err(error) => tracing::warn!(signal_id, %error, "buy notification failed"),
            }
        } else {
            tracing::info!(signal_id, "SKIP: market overbought, no notification");
        }

        Ok(signal)
    }

    /// Runs one sell evaluation: snapshot + history + position → recommend
    /// → persist → notify (SELL and ALERT only, unless forced).
    ///
    /// # Errors
    /// Returns an error if the provider or store fails; sink failures are
    /// logged, not propagated.
    pub async fn run_sell_cycle<T>(
        &mut self,
        strategy: &T,
        opts: CycleOptions,
    ) -> Result<SellSignal>
    where
        T: Strategy<Signal = SellSignal>,
    {
        let snapshot = self.provider.market_snapshot(true).await?;
        let daily_closes: Vec<Decimal> = self.provider.daily_closes(SELL_HISTORY_DAYS).await?;
        let position = self.ledger.get_or_create().await?;

        let ctx = EvaluationContext {
            snapshot: &snapshot,
            position: &position,
            daily_closes: &daily_closes,
        };
        let signal = strategy.evaluate(&ctx);
        let signal_id = self.ledger.store().save_sell_signal(&signal).await?;

        tracing::info!(
            strategy = strategy.name(),
            signal_id,
            action = ?signal.action,
            risk_score = signal.risk_score,
            pi_cycle = signal.pi_cycle_triggered,
            "sell cycle evaluated"
        );

        let should_notify = matches!(signal.action, SellAction::Sell | SellAction::Alert)
            || opts.force_notify;
        if opts.dry_run {
            tracing::info!(signal_id, "dry run: notification suppressed");
        } else if should_notify {
            match self.sink.notify_sell(&signal, &position).await {
                Ok(()) => self.ledger.store().mark_notified(signal_id).await?,
                Err(error) => tracing::warn!(signal_id, %error, "sell notification failed"),
            }
        } else {
            tracing::info!(signal_id, "HOLD: market in safe zone, no notification");
        }

        Ok(signal)
    }
}
