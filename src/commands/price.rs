use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::OddsTable;
use crate::error::Result;
use crate::pricing::{MarketMaker, PricingInput, PricingRun};
use crate::store::Datasets;

/// Row filter for a pricing run. The default prices the whole feature
/// table so the served book covers every game day.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceFilter {
    /// Only price games on or after this date.
    pub from: Option<NaiveDate>,
    /// Only price games without a final score yet.
    pub live: bool,
}

/// Score, calibrate, and price the filtered games, then atomically publish
/// the odds table.
pub fn run(config: &AppConfig, filter: PriceFilter) -> Result<()> {
    let datasets = Datasets::new(config.data.clone());
    let table = datasets.load_features()?;
    let model = datasets.load_model()?;

    // Training-set scores back the on-the-fly calibrator fallback
    let pairs: Vec<(f64, bool)> = table
        .labeled()
        .map(|row| {
            Ok((
                model.predict_sparse(&row.feature_vector())?,
                row.home_win.unwrap_or(false),
            ))
        })
        .collect::<Result<_>>()?;
    let calibrator = datasets.load_or_fit_calibrator(&pairs)?;

    let targets: Vec<_> = table
        .rows
        .iter()
        .filter(|r| filter.from.map_or(true, |d| r.game_date >= d))
        .filter(|r| !filter.live || r.home_win.is_none())
        .collect();
    if targets.is_empty() {
        warn!("no feature rows match the pricing filter {filter:?}");
    }

    let mut inputs = Vec::with_capacity(targets.len());
    for row in &targets {
        let raw = model.predict_sparse(&row.feature_vector())?;
        inputs.push(PricingInput {
            game_id: row.game_id,
            game_date: row.game_date,
            home_abbrev: row.home_abbrev.clone(),
            away_abbrev: row.away_abbrev.clone(),
            p_home: calibrator.transform(raw),
        });
    }

    let maker = MarketMaker::new(config.pricing);
    match maker.price_batch(&inputs) {
        PricingRun::NothingToPrice => {
            info!("nothing to price, odds table left untouched");
            Ok(())
        }
        PricingRun::Priced { rows, skipped } => {
            if skipped > 0 {
                warn!("{skipped} games were skipped during pricing");
            }
            datasets.save_odds(&OddsTable::new(rows))
        }
    }
}
