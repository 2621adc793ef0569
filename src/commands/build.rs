use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::features::FeatureBuilder;
use crate::store::Datasets;

/// Build the rolling feature table from the raw game log plus optional
/// opener and ratings enrichment, and publish it.
pub fn run(config: &AppConfig) -> Result<()> {
    let datasets = Datasets::new(config.data.clone());

    let games = datasets.load_games()?;
    let openers = datasets.load_openers()?;
    let ratings = datasets.load_ratings()?;

    let builder = FeatureBuilder::new(config.features.clone());
    let table = builder.build(games, &openers, &ratings);

    let labeled = table.labeled().count();
    info!(
        "feature table: {} rows ({} labeled, {} pending)",
        table.len(),
        labeled,
        table.len() - labeled
    );

    datasets.save_features(&table)?;
    Ok(())
}
