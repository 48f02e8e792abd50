pub mod buy;
pub mod indicator;
pub mod pi_cycle;
pub mod risk;
pub mod sell;
pub mod series;

pub use buy::BuyClassifier;
pub use indicator::IndicatorEvaluator;
pub use pi_cycle::PiCycleDetector;
pub use risk::{RiskScorer, SignalCounts};
pub use sell::SellRecommender;
