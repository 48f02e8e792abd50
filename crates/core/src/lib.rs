pub mod config;
pub mod config_loader;
pub mod engine;
pub mod error;
pub mod market;
pub mod position;
pub mod signal;
pub mod store;
pub mod traits;

pub use config::{AdvisorConfig, BuyConfig, PositionConfig, SellConfig};
pub use config_loader::ConfigLoader;
pub use engine::{AdvisorEngine, CycleOptions};
pub use error::AdvisorError;
pub use market::MarketSnapshot;
pub use position::{Position, PositionLedger, SaleRecord};
pub use signal::{
    BuyAction, BuySignal, Indicator, RiskLevel, SellAction, SellSignal, Thresholds,
};
pub use store::MemoryStore;
pub use traits::{
    EvaluationContext, MarketDataProvider, NotificationSink, PersistenceStore, Strategy,
};
