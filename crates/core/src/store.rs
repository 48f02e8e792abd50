//! In-memory persistence store.
//!
//! Backs the engine tests and embedders that keep durability elsewhere.
//! Interior mutability through a single async mutex keeps the read-modify-
//! write on `sold_btc` serialized when the store is shared.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AdvisorError;
use crate::position::{Position, SaleRecord};
use crate::signal::{BuySignal, SellSignal};
use crate::traits::PersistenceStore;

#[derive(Debug, Default)]
struct StoredFlags {
    notified: bool,
    executed: bool,
}

#[derive(Default)]
struct Inner {
    position: Option<Position>,
    buy_signals: Vec<(i64, BuySignal, StoredFlags)>,
    sell_signals: Vec<(i64, SellSignal, StoredFlags)>,
    sales: Vec<SaleRecord>,
    next_id: i64,
}

impl Inner {
    fn flags_mut(&mut self, signal_id: i64) -> Option<&mut StoredFlags> {
        self.buy_signals
            .iter_mut()
            .find(|(id, _, _)| *id == signal_id)
            .map(|(_, _, flags)| flags)
            .or_else(|| {
                self.sell_signals
                    .iter_mut()
                    .find(|(id, _, _)| *id == signal_id)
                    .map(|(_, _, flags)| flags)
            })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sale_count(&self) -> usize {
        self.inner.lock().await.sales.len()
    }

    pub async fn sales(&self) -> Vec<SaleRecord> {
        self.inner.lock().await.sales.clone()
    }

    pub async fn is_notified(&self, signal_id: i64) -> bool {
        let mut inner = self.inner.lock().await;
        inner
            .flags_mut(signal_id)
            .map(|flags| flags.notified)
            .unwrap_or(false)
    }

    pub async fn is_executed(&self, signal_id: i64) -> bool {
        let mut inner = self.inner.lock().await;
        inner
            .flags_mut(signal_id)
            .map(|flags| flags.executed)
            .unwrap_or(false)
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn load_position(&self) -> Result<Option<Position>> {
        Ok(self.inner.lock().await.position.clone())
    }

    async fn store_position(&self, position: &Position) -> Result<()> {
        self.inner.lock().await.position = Some(position.clone());
        Ok(())
    }

    async fn save_buy_signal(&self, signal: &BuySignal) -> Result<i64> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .buy_signals
            .push((id, signal.clone(), StoredFlags::default()));
        Ok(id)
    }

    async fn save_sell_signal(&self, signal: &SellSignal) -> Result<i64> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .sell_signals
            .push((id, signal.clone(), StoredFlags::default()));
        Ok(id)
    }

    async fn mark_notified(&self, signal_id: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let flags = inner
            .flags_mut(signal_id)
            .ok_or(AdvisorError::UnknownSignal(signal_id))?;
        flags.notified = true;
        Ok(())
    }

    async fn mark_executed(&self, signal_id: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let flags = inner
            .flags_mut(signal_id)
            .ok_or(AdvisorError::UnknownSignal(signal_id))?;
        flags.executed = true;
        Ok(())
    }

    async fn append_sale(&self, sale: &SaleRecord) -> Result<()> {
        self.inner.lock().await.sales.push(sale.clone());
        Ok(())
    }

    async fn clear_history(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.buy_signals.clear();
        inner.sell_signals.clear();
        inner.sales.clear();
        inner.position = None;
        Ok(())
    }
}
