//! Median imputation for sparse feature rows.
//!
//! Rolling features are `None` early in a season (not enough history) and
//! openers are `None` when no line was posted. The imputer learns one
//! median per feature on the training partition and fills gaps with it at
//! both train and predict time, so train/serve skew cannot creep in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedianImputer {
    /// One median per feature column. Columns that were entirely absent in
    /// training fall back to 0.0.
    pub medians: Vec<f64>,
}

impl MedianImputer {
    /// Fit column medians over rows of optional values. All rows must have
    /// the same width.
    pub fn fit(rows: &[Vec<Option<f64>>]) -> Self {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut medians = Vec::with_capacity(width);
        for col in 0..width {
            let mut values: Vec<f64> = rows
                .iter()
                .filter_map(|row| row[col])
                .filter(|v| v.is_finite())
                .collect();
            medians.push(median_of(&mut values).unwrap_or(0.0));
        }
        Self { medians }
    }

    pub fn width(&self) -> usize {
        self.medians.len()
    }

    /// Densify one row, filling each gap with the learned column median.
    pub fn transform(&self, row: &[Option<f64>]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(i, v)| match v {
                Some(x) if x.is_finite() => *x,
                _ => self.medians.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

fn median_of(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
