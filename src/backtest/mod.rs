//! Time-aware backtesting.
//!
//! Each run draws a seeded cutoff, trains on everything before it, and
//! scores the contiguous block that follows. Training never sees the
//! evaluation block, and the block is never shuffled, so the evaluation
//! mirrors how the model is used in production (fit on the past, price
//! the near future).

pub mod metrics;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};
use tracing::info;

use crate::config::ModelConfig;
use crate::error::{HardwoodError, Result};
use crate::model::LogisticModel;

pub use metrics::ClassificationMetrics;

#[derive(Debug, Clone)]
pub struct BacktestOptions {
    /// Minimum number of rows the training prefix must keep.
    pub min_train: usize,
    /// Size of the contiguous evaluation block after the cutoff.
    pub block_size: usize,
    pub n_runs: usize,
}

impl Default for BacktestOptions {
    fn default() -> Self {
        Self {
            min_train: 200,
            block_size: 100,
            n_runs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRun {
    pub cutoff: usize,
    pub metrics: ClassificationMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub runs: Vec<BacktestRun>,
}

impl BacktestSummary {
    pub fn mean_std(&self, pick: impl Fn(&ClassificationMetrics) -> Option<f64>) -> Option<(f64, f64)> {
        let values: Vec<f64> = self.runs.iter().filter_map(|r| pick(&r.metrics)).collect();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some((mean, var.sqrt()))
    }

    /// Render a mean +/- stdev table, one line per metric.
    pub fn render_table(&self) -> String {
        #[derive(Tabled)]
        struct MetricRow {
            metric: &'static str,
            #[tabled(rename = "mean ± std")]
            value: String,
        }

        let format = |stat: Option<(f64, f64)>| match stat {
            Some((mean, std)) => format!("{mean:.4} ± {std:.4}"),
            None => "n/a".to_string(),
        };

        let rows = vec![
            MetricRow {
                metric: "accuracy",
                value: format(self.mean_std(|m| Some(m.accuracy))),
            },
            MetricRow {
                metric: "precision",
                value: format(self.mean_std(|m| Some(m.precision))),
            },
            MetricRow {
                metric: "recall",
                value: format(self.mean_std(|m| Some(m.recall))),
            },
            MetricRow {
                metric: "f1",
                value: format(self.mean_std(|m| Some(m.f1))),
            },
            MetricRow {
                metric: "roc_auc",
                value: format(self.mean_std(|m| m.roc_auc)),
            },
        ];
        Table::new(rows).to_string()
    }
}

pub struct Backtester {
    model_config: ModelConfig,
    options: BacktestOptions,
}

impl Backtester {
    pub fn new(model_config: ModelConfig, options: BacktestOptions) -> Self {
        Self {
            model_config,
            options,
        }
    }

    /// Run the full backtest over labeled rows, already in chronological
    /// order. Cutoffs are drawn from a rng seeded with the model seed, so
    /// the same data and config replay the same splits.
    pub fn run(
        &self,
        feature_names: &[String],
        rows: &[Vec<Option<f64>>],
        labels: &[bool],
    ) -> Result<BacktestSummary> {
        let opts = &self.options;
        let needed = opts.min_train + opts.block_size;
        if rows.len() < needed {
            return Err(HardwoodError::Validation(format!(
                "backtest needs at least {needed} labeled rows (min_train {} + block {}), got {}",
                opts.min_train,
                opts.block_size,
                rows.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.model_config.seed);
        let max_cutoff = rows.len() - opts.block_size;
        let mut runs = Vec::with_capacity(opts.n_runs);
        for run_idx in 0..opts.n_runs {
            let cutoff = rng.gen_range(opts.min_train..=max_cutoff);
            let model = LogisticModel::fit(
                feature_names,
                &rows[..cutoff],
                &labels[..cutoff],
                &self.model_config,
            )?;

            let block = &rows[cutoff..cutoff + opts.block_size];
            let block_labels = &labels[cutoff..cutoff + opts.block_size];
            let probs: Vec<f64> = block
                .iter()
                .map(|row| model.predict_sparse(row))
                .collect::<Result<_>>()?;

            let metrics = ClassificationMetrics::compute(block_labels, &probs);
            info!(
                "backtest run {}/{}: cutoff {cutoff}, accuracy {:.4}",
                run_idx + 1,
                opts.n_runs,
                metrics.accuracy
            );
            runs.push(BacktestRun { cutoff, metrics });
        }
        Ok(BacktestSummary { runs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_config() -> ModelConfig {
        ModelConfig {
            learning_rate: 0.1,
            epochs: 200,
            l2: 1e-4,
            seed: 42,
        }
    }

    fn synthetic(n: usize) -> (Vec<String>, Vec<Vec<Option<f64>>>, Vec<bool>) {
        let names = vec!["edge".to_string()];
        let mut rows = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let x = ((i * 37) % 100) as f64 / 50.0 - 1.0;
            rows.push(vec![Some(x)]);
            labels.push(x > 0.0);
        }
        (names, rows, labels)
    }

    #[test]
    fn backtest_is_reproducible() {
        let (names, rows, labels) = synthetic(400);
        let opts = BacktestOptions {
            min_train: 100,
            block_size: 50,
            n_runs: 3,
        };
        let tester = Backtester::new(model_config(), opts);
        let a = tester.run(&names, &rows, &labels).unwrap();
        let b = tester.run(&names, &rows, &labels).unwrap();
        let cutoffs_a: Vec<usize> = a.runs.iter().map(|r| r.cutoff).collect();
        let cutoffs_b: Vec<usize> = b.runs.iter().map(|r| r.cutoff).collect();
        assert_eq!(cutoffs_a, cutoffs_b);
    }

    #[test]
    fn cutoffs_respect_min_train_and_block() {
        let (names, rows, labels) = synthetic(400);
        let opts = BacktestOptions {
            min_train: 150,
            block_size: 100,
            n_runs: 5,
        };
        let tester = Backtester::new(model_config(), opts);
        let summary = tester.run(&names, &rows, &labels).unwrap();
        for run in &summary.runs {
            assert!(run.cutoff >= 150);
            assert!(run.cutoff + 100 <= 400);
            assert_eq!(run.metrics.n, 100);
        }
    }

    #[test]
    fn refuses_too_little_data() {
        let (names, rows, labels) = synthetic(100);
        let tester = Backtester::new(model_config(), BacktestOptions::default());
        assert!(tester.run(&names, &rows, &labels).is_err());
    }

    #[test]
    fn summary_aggregates_mean_and_std() {
        let (names, rows, labels) = synthetic(400);
        let opts = BacktestOptions {
            min_train: 100,
            block_size: 50,
            n_runs: 4,
        };
        let tester = Backtester::new(model_config(), opts);
        let summary = tester.run(&names, &rows, &labels).unwrap();
        let (mean, std) = summary.mean_std(|m| Some(m.accuracy)).unwrap();
        assert!((0.0..=1.0).contains(&mean));
        assert!(std >= 0.0);
        let rendered = summary.render_table();
        assert!(rendered.contains("accuracy"));
    }
}
