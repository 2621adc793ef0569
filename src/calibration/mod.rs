//! Isotonic probability calibration.
//!
//! Maps raw model scores onto empirically observed win rates with a
//! monotone step function fit by pool-adjacent-violators, then evaluated
//! with linear interpolation. Inputs outside the fitted range clip to the
//! endpoint values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{HardwoodError, Result};
use crate::store::save_json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsotonicCalibrator {
    /// Raw-score knots, strictly increasing.
    pub thresholds: Vec<f64>,
    /// Calibrated probability at each knot, non-decreasing, in [0, 1].
    pub values: Vec<f64>,
}

impl IsotonicCalibrator {
    /// Fit from (raw score, observed outcome) pairs. Non-finite scores are
    /// dropped; duplicate scores are pooled before the monotone fit.
    pub fn fit(pairs: &[(f64, bool)]) -> Result<Self> {
        let mut clean: Vec<(f64, f64)> = pairs
            .iter()
            .filter(|(p, _)| p.is_finite())
            .map(|&(p, won)| (p, if won { 1.0 } else { 0.0 }))
            .collect();
        if clean.len() < 2 {
            return Err(HardwoodError::Validation(format!(
                "isotonic fit needs at least 2 finite pairs, got {}",
                clean.len()
            )));
        }
        clean.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        // Pool duplicate x values so knots stay strictly increasing
        let mut blocks: Vec<Block> = Vec::with_capacity(clean.len());
        for (x, y) in clean {
            match blocks.last_mut() {
                Some(last) if last.x_max == x => {
                    last.sum += y;
                    last.weight += 1.0;
                }
                _ => blocks.push(Block {
                    x_min: x,
                    x_max: x,
                    sum: y,
                    weight: 1.0,
                }),
            }
        }

        // Pool-adjacent-violators: merge while any block mean decreases
        let mut stack: Vec<Block> = Vec::with_capacity(blocks.len());
        for block in blocks {
            stack.push(block);
            while stack.len() >= 2 {
                let n = stack.len();
                if stack[n - 2].mean() <= stack[n - 1].mean() {
                    break;
                }
                let top = stack.pop().unwrap();
                let prev = stack.last_mut().unwrap();
                prev.x_max = top.x_max;
                prev.sum += top.sum;
                prev.weight += top.weight;
            }
        }

        let mut thresholds = Vec::new();
        let mut values = Vec::new();
        for block in &stack {
            let v = block.mean().clamp(0.0, 1.0);
            thresholds.push(block.x_min);
            values.push(v);
            if block.x_max > block.x_min {
                thresholds.push(block.x_max);
                values.push(v);
            }
        }
        Ok(Self { thresholds, values })
    }

    /// Calibrated probability for a raw score. Clips outside the fitted
    /// range, interpolates linearly inside it.
    pub fn transform(&self, raw: f64) -> f64 {
        let first = self.thresholds[0];
        let last = *self.thresholds.last().unwrap_or(&first);
        if raw <= first {
            return self.values[0];
        }
        if raw >= last {
            return *self.values.last().unwrap_or(&self.values[0]);
        }
        let idx = match self
            .thresholds
            .binary_search_by(|t| t.partial_cmp(&raw).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => return self.values[i],
            Err(i) => i,
        };
        let (x0, x1) = (self.thresholds[idx - 1], self.thresholds[idx]);
        let (y0, y1) = (self.values[idx - 1], self.values[idx]);
        let t = (raw - x0) / (x1 - x0);
        (y0 + t * (y1 - y0)).clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.thresholds.is_empty() || self.thresholds.len() != self.values.len() {
            return Err(format!(
                "calibrator has {} thresholds and {} values",
                self.thresholds.len(),
                self.values.len()
            ));
        }
        if self.thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err("calibrator thresholds must be non-decreasing".to_string());
        }
        if self.values.windows(2).any(|w| w[0] > w[1]) {
            return Err("calibrator values must be non-decreasing".to_string());
        }
        if self.values.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err("calibrator values must lie in [0, 1]".to_string());
        }
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let calibrator: Self = serde_json::from_str(&content)?;
        calibrator.validate().map_err(HardwoodError::Validation)?;
        Ok(calibrator)
    }

    /// Load a saved calibrator, or fit one on the fly from `pairs` when the
    /// artifact is missing. The fresh fit is saved back to `path` so later
    /// runs load it instead of refitting, and the fallback is logged loudly.
    pub fn load_or_fit<P: AsRef<Path>>(path: P, pairs: &[(f64, bool)]) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let calibrator = Self::from_file(path)?;
            info!("loaded calibrator from {}", path.display());
            return Ok(calibrator);
        }
        let calibrator = Self::fit(pairs)?;
        save_json(path, &calibrator)?;
        warn!(
            "calibrator artifact was missing, fit on the fly from {} pairs and saved to {}",
            pairs.len(),
            path.display()
        );
        Ok(calibrator)
    }
}

struct Block {
    x_min: f64,
    x_max: f64,
    sum: f64,
    weight: f64,
}

impl Block {
    fn mean(&self) -> f64 {
        self.sum / self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_ordered_data_is_preserved() {
        let pairs = vec![(0.1, false), (0.3, false), (0.6, true), (0.9, true)];
        let cal = IsotonicCalibrator::fit(&pairs).unwrap();
        cal.validate().unwrap();
        assert_eq!(cal.transform(0.1), 0.0);
        assert_eq!(cal.transform(0.9), 1.0);
    }

    #[test]
    fn violators_are_pooled() {
        // 0.2 -> win but 0.8 -> loss forces a pooled plateau
        let pairs = vec![(0.2, true), (0.8, false)];
        let cal = IsotonicCalibrator::fit(&pairs).unwrap();
        assert!((cal.transform(0.2) - 0.5).abs() < 1e-12);
        assert!((cal.transform(0.8) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn output_is_monotone_and_clipped() {
        let pairs = vec![
            (0.1, false),
            (0.2, false),
            (0.4, true),
            (0.5, false),
            (0.7, true),
            (0.9, true),
        ];
        let cal = IsotonicCalibrator::fit(&pairs).unwrap();
        cal.validate().unwrap();
        let mut prev = cal.transform(0.0);
        for step in 1..=100 {
            let p = cal.transform(step as f64 / 100.0);
            assert!(p >= prev - 1e-12);
            assert!((0.0..=1.0).contains(&p));
            prev = p;
        }
        // out-of-range inputs clip to the endpoints
        assert_eq!(cal.transform(-5.0), cal.transform(0.0));
        assert_eq!(cal.transform(5.0), cal.transform(1.0));
    }

    #[test]
    fn interpolates_between_knots() {
        let pairs = vec![(0.0, false), (1.0, true)];
        let cal = IsotonicCalibrator::fit(&pairs).unwrap();
        assert!((cal.transform(0.5) - 0.5).abs() < 1e-12);
        assert!((cal.transform(0.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn on_the_fly_fit_saves_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibrator.json");
        let pairs = vec![(0.1, false), (0.4, false), (0.6, true), (0.9, true)];

        let fitted = IsotonicCalibrator::load_or_fit(&path, &pairs).unwrap();
        assert!(path.exists(), "fallback fit must persist the calibrator");

        // the saved artifact is loaded on the next run, not refit
        let reloaded = IsotonicCalibrator::load_or_fit(&path, &[]).unwrap();
        assert_eq!(reloaded.thresholds, fitted.thresholds);
        assert_eq!(reloaded.values, fitted.values);
    }

    #[test]
    fn refuses_degenerate_input() {
        assert!(IsotonicCalibrator::fit(&[(0.5, true)]).is_err());
        assert!(IsotonicCalibrator::fit(&[(f64::NAN, true), (f64::NAN, false)]).is_err());
    }
}
