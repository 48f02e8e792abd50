use rust_decimal::Decimal;
use thiserror::Error;

/// Domain errors raised by the advisor core itself.
///
/// Collaborator failures (market data, persistence, notification) travel
/// through `anyhow` at the trait seams; these variants cover the cases the
/// core can detect on its own.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("sale amount must be positive, got {0}")]
    InvalidSaleAmount(Decimal),

    #[error("sale price must be positive, got {0}")]
    InvalidSalePrice(Decimal),

    #[error("unknown signal id: {0}")]
    UnknownSignal(i64),

    #[error("configuration error: {0}")]
    Config(String),
}
