//! Soft-voting ensemble: a weighted average of member probabilities.
//!
//! Members are trained on seeded bootstrap resamples of the training
//! partition, so the whole ensemble is reproducible from the config seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::{HardwoodError, Result};
use crate::model::{LogisticModel, Predictor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingEnsemble {
    pub members: Vec<LogisticModel>,
    /// One non-negative weight per member; normalized at predict time.
    pub weights: Vec<f64>,
}

impl VotingEnsemble {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.members.is_empty() {
            return Err("ensemble must have at least one member".to_string());
        }
        if self.weights.len() != self.members.len() {
            return Err(format!(
                "weight count {} != member count {}",
                self.weights.len(),
                self.members.len()
            ));
        }
        if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("ensemble weights must be finite and >= 0".to_string());
        }
        if self.weights.iter().sum::<f64>() <= 0.0 {
            return Err("ensemble weights must not all be zero".to_string());
        }
        let names = self.members[0].feature_names.clone();
        for (idx, member) in self.members.iter().enumerate() {
            member
                .validate()
                .map_err(|e| format!("member[{idx}]: {e}"))?;
            if member.feature_names != names {
                return Err(format!("member[{idx}] feature order differs from member[0]"));
            }
        }
        Ok(())
    }

    /// Train `n_members` models on bootstrap resamples drawn from a rng
    /// seeded with the config seed. Equal weights.
    pub fn fit_bootstrap(
        feature_names: &[String],
        rows: &[Vec<Option<f64>>],
        labels: &[bool],
        config: &ModelConfig,
        n_members: usize,
    ) -> Result<Self> {
        if n_members == 0 {
            return Err(HardwoodError::Validation(
                "ensemble size must be >= 1".to_string(),
            ));
        }
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut members = Vec::with_capacity(n_members);
        for _ in 0..n_members {
            let mut sample_rows = Vec::with_capacity(rows.len());
            let mut sample_labels = Vec::with_capacity(rows.len());
            for _ in 0..rows.len() {
                let idx = rng.gen_range(0..rows.len());
                sample_rows.push(rows[idx].clone());
                sample_labels.push(labels[idx]);
            }
            members.push(LogisticModel::fit(
                feature_names,
                &sample_rows,
                &sample_labels,
                config,
            )?);
        }
        let ensemble = Self {
            weights: vec![1.0; members.len()],
            members,
        };
        ensemble.validate().map_err(HardwoodError::Validation)?;
        Ok(ensemble)
    }

    /// Weighted vote over a sparse row; each member imputes with its own
    /// training medians.
    pub fn predict_sparse(&self, row: &[Option<f64>]) -> Result<f64> {
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for (member, &w) in self.members.iter().zip(&self.weights) {
            if w == 0.0 {
                continue;
            }
            total += w * member.predict_sparse(row)?;
            weight_sum += w;
        }
        Ok(total / weight_sum)
    }
}

impl Predictor for VotingEnsemble {
    fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for (member, &w) in self.members.iter().zip(&self.weights) {
            if w == 0.0 {
                continue;
            }
            total += w * member.predict_proba(features)?;
            weight_sum += w;
        }
        Ok(total / weight_sum)
    }

    fn feature_names(&self) -> &[String] {
        self.members[0].feature_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig {
            learning_rate: 0.1,
            epochs: 300,
            l2: 1e-4,
            seed: 7,
        }
    }

    fn training_data() -> (Vec<String>, Vec<Vec<Option<f64>>>, Vec<bool>) {
        let names = vec!["edge".to_string()];
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..60 {
            let x = (i as f64) / 15.0 - 2.0;
            rows.push(vec![Some(x)]);
            labels.push(x > 0.0);
        }
        (names, rows, labels)
    }

    #[test]
    fn bootstrap_fit_is_reproducible() {
        let (names, rows, labels) = training_data();
        let a = VotingEnsemble::fit_bootstrap(&names, &rows, &labels, &config(), 3).unwrap();
        let b = VotingEnsemble::fit_bootstrap(&names, &rows, &labels, &config(), 3).unwrap();
        for (ma, mb) in a.members.iter().zip(&b.members) {
            assert_eq!(ma.weights, mb.weights);
        }
    }

    #[test]
    fn vote_is_weighted_average() {
        let (names, rows, labels) = training_data();
        let ensemble = VotingEnsemble::fit_bootstrap(&names, &rows, &labels, &config(), 3).unwrap();
        let p = ensemble.predict_proba(&[1.5]).unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert!(p > 0.5);
    }

    #[test]
    fn rejects_mismatched_weight_count() {
        let (names, rows, labels) = training_data();
        let mut ensemble =
            VotingEnsemble::fit_bootstrap(&names, &rows, &labels, &config(), 2).unwrap();
        ensemble.weights.pop();
        assert!(ensemble.validate().is_err());
    }
}
