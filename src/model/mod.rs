//! Win-probability models.
//!
//! All predictors are small, deterministic, CPU-only artifacts loaded from
//! JSON. Explicit shape validation up front so a bad artifact fails fast
//! instead of producing garbage prices.

pub mod ensemble;
pub mod imputer;
pub mod logistic;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HardwoodError, Result};

pub use ensemble::VotingEnsemble;
pub use imputer::MedianImputer;
pub use logistic::LogisticModel;

/// Anything that maps a dense feature vector to a home-win probability.
pub trait Predictor {
    /// Probability in [0, 1] that the home side wins.
    fn predict_proba(&self, features: &[f64]) -> Result<f64>;

    /// Feature names, in the order `predict_proba` expects them.
    fn feature_names(&self) -> &[String];
}

/// On-disk model artifact: either a single logistic model or a weighted
/// ensemble of them. Tagged so the JSON is self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Single(LogisticModel),
    Ensemble(VotingEnsemble),
}

impl ModelArtifact {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let artifact: Self = serde_json::from_str(&content)?;
        artifact.validate().map_err(HardwoodError::Validation)?;
        Ok(artifact)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Self::Single(model) => model.validate(),
            Self::Ensemble(ensemble) => ensemble.validate(),
        }
    }

    /// Probability from a sparse row, imputing gaps first.
    pub fn predict_sparse(&self, row: &[Option<f64>]) -> Result<f64> {
        match self {
            Self::Single(model) => model.predict_sparse(row),
            Self::Ensemble(ensemble) => ensemble.predict_sparse(row),
        }
    }
}

impl Predictor for ModelArtifact {
    fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        match self {
            Self::Single(model) => model.predict_proba(features),
            Self::Ensemble(ensemble) => ensemble.predict_proba(features),
        }
    }

    fn feature_names(&self) -> &[String] {
        match self {
            Self::Single(model) => model.feature_names(),
            Self::Ensemble(ensemble) => ensemble.feature_names(),
        }
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    // Numerically-stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_symmetric_around_half() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(3.0) + sigmoid(-3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        assert!(sigmoid(1e6) <= 1.0);
        assert!(sigmoid(-1e6) >= 0.0);
    }
}
