//! L2-regularized logistic regression, trained by deterministic full-batch
//! gradient descent. Inputs are median-imputed and z-scored with statistics
//! learned on the training partition only.

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::{HardwoodError, Result};
use crate::model::{sigmoid, MedianImputer, Predictor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub imputer: MedianImputer,
    /// z-score normalization, learned on the training rows.
    pub input_mean: Vec<f64>,
    pub input_std: Vec<f64>,
    /// Free-form training metadata (sample counts, hyperparameters).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl LogisticModel {
    pub fn validate(&self) -> std::result::Result<(), String> {
        let dim = self.feature_names.len();
        if dim == 0 {
            return Err("feature_names must not be empty".to_string());
        }
        for (name, len) in [
            ("weights", self.weights.len()),
            ("imputer medians", self.imputer.width()),
            ("input_mean", self.input_mean.len()),
            ("input_std", self.input_std.len()),
        ] {
            if len != dim {
                return Err(format!("{name} length {len} != feature count {dim}"));
            }
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.bias.is_finite() {
            return Err("weights contain non-finite values".to_string());
        }
        if self.input_std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("input_std must be finite and > 0".to_string());
        }
        Ok(())
    }

    /// Train on sparse rows and binary labels. Gradient descent is
    /// full-batch, so two runs over the same rows produce identical
    /// weights.
    pub fn fit(
        feature_names: &[String],
        rows: &[Vec<Option<f64>>],
        labels: &[bool],
        config: &ModelConfig,
    ) -> Result<Self> {
        if rows.is_empty() {
            return Err(HardwoodError::Validation(
                "cannot fit a model on zero training rows".to_string(),
            ));
        }
        if rows.len() != labels.len() {
            return Err(HardwoodError::Validation(format!(
                "row count {} != label count {}",
                rows.len(),
                labels.len()
            )));
        }

        let dim = feature_names.len();
        let imputer = MedianImputer::fit(rows);
        let dense: Vec<Vec<f64>> = rows.iter().map(|r| imputer.transform(r)).collect();

        let (mean, std) = column_stats(&dense, dim);
        let scaled: Vec<Vec<f64>> = dense
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, v)| (v - mean[i]) / std[i])
                    .collect()
            })
            .collect();

        let n = scaled.len() as f64;
        let mut weights = vec![0.0_f64; dim];
        let mut bias = 0.0_f64;

        for _ in 0..config.epochs {
            let mut grad_w = vec![0.0_f64; dim];
            let mut grad_b = 0.0_f64;
            for (row, &label) in scaled.iter().zip(labels) {
                let z = bias + dot(&weights, row);
                let err = sigmoid(z) - if label { 1.0 } else { 0.0 };
                for i in 0..dim {
                    grad_w[i] += err * row[i];
                }
                grad_b += err;
            }
            for i in 0..dim {
                weights[i] -= config.learning_rate * (grad_w[i] / n + config.l2 * weights[i]);
            }
            bias -= config.learning_rate * grad_b / n;
        }

        let positives = labels.iter().filter(|&&l| l).count();
        let model = Self {
            feature_names: feature_names.to_vec(),
            weights,
            bias,
            imputer,
            input_mean: mean,
            input_std: std,
            metadata: serde_json::json!({
                "train_rows": rows.len(),
                "train_positives": positives,
                "learning_rate": config.learning_rate,
                "epochs": config.epochs,
                "l2": config.l2,
            }),
        };
        model.validate().map_err(HardwoodError::Validation)?;
        Ok(model)
    }

    /// Probability from a sparse row, running imputation first.
    pub fn predict_sparse(&self, row: &[Option<f64>]) -> Result<f64> {
        let dense = self.imputer.transform(row);
        self.predict_proba(&dense)
    }
}

impl Predictor for LogisticModel {
    fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.feature_names.len() {
            return Err(HardwoodError::Validation(format!(
                "feature dim mismatch: got {}, expected {}",
                features.len(),
                self.feature_names.len()
            )));
        }
        let mut z = self.bias;
        for i in 0..features.len() {
            let denom = self.input_std[i].max(1e-12);
            z += self.weights[i] * (features[i] - self.input_mean[i]) / denom;
        }
        Ok(sigmoid(z))
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn column_stats(rows: &[Vec<f64>], dim: usize) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len() as f64;
    let mut mean = vec![0.0_f64; dim];
    for row in rows {
        for i in 0..dim {
            mean[i] += row[i];
        }
    }
    for m in &mut mean {
        *m /= n;
    }
    let mut std = vec![0.0_f64; dim];
    for row in rows {
        for i in 0..dim {
            let d = row[i] - mean[i];
            std[i] += d * d;
        }
    }
    for s in &mut std {
        // constant columns get unit scale instead of dividing by zero
        *s = (*s / n).sqrt().max(1e-6);
    }
    (mean, std)
}
