use tracing::info;

use crate::backtest::{BacktestOptions, Backtester};
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::Datasets;

/// Backtest the model over seeded time splits and print the aggregated
/// metric table.
pub fn run(config: &AppConfig, options: BacktestOptions) -> Result<()> {
    let datasets = Datasets::new(config.data.clone());
    let table = datasets.load_features()?;

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for row in table.labeled() {
        rows.push(row.feature_vector());
        labels.push(row.home_win.unwrap_or(false));
    }
    info!(
        "backtesting over {} labeled games ({} runs)",
        rows.len(),
        options.n_runs
    );

    let tester = Backtester::new(config.model.clone(), options);
    let summary = tester.run(&table.feature_names, &rows, &labels)?;

    println!("{}", summary.render_table());
    Ok(())
}
