//! Position state and the ledger that mutates it.
//!
//! The ledger is the only mutable state in the core: `total_btc` and
//! `cost_basis_usd` are fixed at creation or reset, and `sold_btc` only
//! grows through recorded sales. Requiring `&mut self` on every write
//! serializes mutations against reads for a single ledger handle.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PositionConfig;
use crate::error::AdvisorError;
use crate::traits::PersistenceStore;

/// Holdings tracked against an original cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Original position size. Set once at creation or reset.
    pub total_btc: Decimal,
    /// Cumulative amount sold. Monotonically non-decreasing.
    pub sold_btc: Decimal,
    /// Original fiat cost of the whole position.
    pub cost_basis_usd: Decimal,
}

impl Position {
    #[must_use]
    pub const fn new(total_btc: Decimal, cost_basis_usd: Decimal) -> Self {
        Self {
            total_btc,
            sold_btc: Decimal::ZERO,
            cost_basis_usd,
        }
    }

    #[must_use]
    pub fn remaining_btc(&self) -> Decimal {
        self.total_btc - self.sold_btc
    }

    #[must_use]
    pub fn cost_per_btc(&self) -> Decimal {
        if self.total_btc > Decimal::ZERO {
            self.cost_basis_usd / self.total_btc
        } else {
            Decimal::ZERO
        }
    }

    /// Unrealized P&L of the remaining holdings at the given price.
    #[must_use]
    pub fn unrealized_pnl(&self, price: Decimal) -> Decimal {
        self.remaining_btc() * (price - self.cost_per_btc())
    }

    /// Fraction of the original position already sold, in [0, 1].
    #[must_use]
    pub fn fraction_sold(&self) -> Decimal {
        if self.total_btc > Decimal::ZERO {
            self.sold_btc / self.total_btc
        } else {
            Decimal::ZERO
        }
    }
}

/// Immutable record of one executed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub timestamp: DateTime<Utc>,
    pub btc_amount: Decimal,
    pub price: Decimal,
    pub usd_received: Decimal,
    pub exchange: String,
    /// The sell signal this sale executed, when known.
    pub signal_id: Option<i64>,
    pub notes: Option<String>,
}

/// Ledger over a persistence store: creates the position on first access,
/// applies sales, and performs the destructive reset.
pub struct PositionLedger<S> {
    store: S,
    defaults: PositionConfig,
}

impl<S: PersistenceStore> PositionLedger<S> {
    #[must_use]
    pub const fn new(store: S, defaults: PositionConfig) -> Self {
        Self { store, defaults }
    }

    /// Access to the underlying store, for signal persistence.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored position, creating it from the configured
    /// defaults on first access. Idempotent: repeated calls without an
    /// intervening sale or reset return identical values.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn get_or_create(&mut self) -> Result<Position> {
        if let Some(position) = self.store.load_position().await? {
            return Ok(position);
        }

        let position = Position::new(self.defaults.total_btc, self.defaults.cost_basis_usd);
        self.store.store_position(&position).await?;
        tracing::info!(
            total_btc = %position.total_btc,
            cost_basis_usd = %position.cost_basis_usd,
            "created position from defaults"
        );
        Ok(position)
    }

    /// Records an executed sale: appends the sale event, bumps `sold_btc`,
    /// and marks the originating signal executed when one is supplied.
    /// Returns the USD received.
    ///
    /// A sale larger than the remaining holdings is accepted but surfaced
    /// with a warning; the stored history remains the source of truth.
    ///
    /// # Errors
    /// Returns [`AdvisorError::InvalidSaleAmount`] or
    /// [`AdvisorError::InvalidSalePrice`] for non-positive inputs, or any
    /// store failure.
    pub async fn record_sale(
        &mut self,
        btc_amount: Decimal,
        price: Decimal,
        exchange: &str,
        signal_id: Option<i64>,
    ) -> Result<Decimal> {
        if btc_amount <= Decimal::ZERO {
            return Err(AdvisorError::InvalidSaleAmount(btc_amount).into());
        }
        if price <= Decimal::ZERO {
            return Err(AdvisorError::InvalidSalePrice(price).into());
        }

        let mut position = self.get_or_create().await?;
        if btc_amount > position.remaining_btc() {
            tracing::warn!(
                %btc_amount,
                remaining_btc = %position.remaining_btc(),
                "sale exceeds remaining holdings"
            );
        }

        let usd_received = btc_amount * price;
        let sale = SaleRecord {
            timestamp: Utc::now(),
            btc_amount,
            price,
            usd_received,
            exchange: exchange.to_string(),
            signal_id,
            notes: None,
        };

        self.store.append_sale(&sale).await?;
        position.sold_btc += btc_amount;
        self.store.store_position(&position).await?;

        if let Some(id) = signal_id {
            self.store.mark_executed(id).await?;
        }

        tracing::info!(%btc_amount, %price, %usd_received, exchange, "sale recorded");
        Ok(usd_received)
    }

    /// Destructively replaces the position and discards all prior signals
    /// and sale history. Irreversible; confirmation belongs at the caller's
    /// boundary, not here.
    ///
    /// # Errors
    /// Returns an error if the store cannot purge or write.
    pub async fn reset(&mut self, total_btc: Decimal, cost_basis_usd: Decimal) -> Result<Position> {
        self.store.clear_history().await?;
        let position = Position::new(total_btc, cost_basis_usd);
        self.store.store_position(&position).await?;
        tracing::info!(%total_btc, %cost_basis_usd, "position reset, history discarded");
        Ok(position)
    }
}
