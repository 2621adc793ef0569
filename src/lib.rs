pub mod api;
pub mod backtest;
pub mod calibration;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod model;
pub mod pricing;
pub mod store;

pub use backtest::{BacktestOptions, BacktestSummary, Backtester, ClassificationMetrics};
pub use calibration::IsotonicCalibrator;
pub use config::AppConfig;
pub use domain::{FeatureRow, FeatureTable, GameLog, OddsTable, PricedGame, FEATURE_NAMES};
pub use error::{HardwoodError, Result};
pub use features::FeatureBuilder;
pub use model::{LogisticModel, ModelArtifact, Predictor, VotingEnsemble};
pub use pricing::{american_to_prob, prob_to_american, MarketMaker, PricingInput, PricingRun};
pub use store::Datasets;
