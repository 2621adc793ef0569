//! Binary classification metrics.

use serde::{Deserialize, Serialize};

/// Metrics for one evaluation block. `roc_auc` is `None` when the block
/// contains only one class, where the curve is undefined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: Option<f64>,
    pub n: usize,
}

impl ClassificationMetrics {
    /// Score predicted probabilities against outcomes at a 0.5 threshold.
    /// Zero-denominator precision/recall/F1 report 0 rather than NaN.
    pub fn compute(labels: &[bool], probs: &[f64]) -> Self {
        debug_assert_eq!(labels.len(), probs.len());
        let n = labels.len();

        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut tn = 0usize;
        let mut fals_neg = 0usize;
        for (&label, &p) in labels.iter().zip(probs) {
            let predicted = p >= 0.5;
            match (predicted, label) {
                (true, true) => tp += 1,
                (true, false) => fp += 1,
                (false, false) => tn += 1,
                (false, true) => fals_neg += 1,
            }
        }

        let accuracy = if n == 0 {
            0.0
        } else {
            (tp + tn) as f64 / n as f64
        };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fals_neg);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
            roc_auc: roc_auc(labels, probs),
            n,
        }
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Rank-based ROC-AUC (Mann-Whitney U), with tie handling via midranks.
/// `None` when either class is absent.
pub fn roc_auc(labels: &[bool], probs: &[f64]) -> Option<f64> {
    let positives = labels.iter().filter(|&&l| l).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }

    let mut indexed: Vec<(f64, bool)> = probs.iter().copied().zip(labels.iter().copied()).collect();
    indexed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    // Midrank-sum of the positive class
    let mut rank_sum = 0.0;
    let mut i = 0;
    while i < indexed.len() {
        let mut j = i;
        while j < indexed.len() && indexed[j].0 == indexed[i].0 {
            j += 1;
        }
        let midrank = (i + j + 1) as f64 / 2.0;
        for item in &indexed[i..j] {
            if item.1 {
                rank_sum += midrank;
            }
        }
        i = j;
    }

    let p = positives as f64;
    let n = negatives as f64;
    Some((rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}
