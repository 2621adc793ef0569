pub mod rolling;

pub use rolling::FeatureBuilder;
