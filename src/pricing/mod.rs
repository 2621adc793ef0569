pub mod american;
pub mod engine;

pub use american::{american_to_prob, prob_to_american};
pub use engine::{MarketMaker, PricingInput, PricingRun};
