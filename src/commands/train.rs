use tracing::info;

use crate::config::AppConfig;
use crate::error::{HardwoodError, Result};
use crate::model::{LogisticModel, ModelArtifact, VotingEnsemble};
use crate::store::Datasets;

/// Train the win-probability model on every labeled feature row, fit the
/// isotonic calibrator on the model's own training-set scores, and publish
/// both artifacts.
pub fn run(config: &AppConfig, ensemble_size: Option<usize>) -> Result<()> {
    let datasets = Datasets::new(config.data.clone());
    let table = datasets.load_features()?;

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for row in table.labeled() {
        rows.push(row.feature_vector());
        labels.push(row.home_win.unwrap_or(false));
    }
    if rows.is_empty() {
        return Err(HardwoodError::Validation(
            "feature table has no labeled rows to train on".to_string(),
        ));
    }
    info!("training on {} labeled games", rows.len());

    let artifact = match ensemble_size {
        Some(n) if n > 1 => {
            info!("fitting a {n}-member bootstrap ensemble");
            ModelArtifact::Ensemble(VotingEnsemble::fit_bootstrap(
                &table.feature_names,
                &rows,
                &labels,
                &config.model,
                n,
            )?)
        }
        _ => ModelArtifact::Single(LogisticModel::fit(
            &table.feature_names,
            &rows,
            &labels,
            &config.model,
        )?),
    };

    let pairs: Vec<(f64, bool)> = rows
        .iter()
        .zip(&labels)
        .map(|(row, &label)| Ok((artifact.predict_sparse(row)?, label)))
        .collect::<Result<_>>()?;
    let calibrator = crate::calibration::IsotonicCalibrator::fit(&pairs)?;

    datasets.save_model(&artifact)?;
    datasets.save_calibrator(&calibrator)?;
    Ok(())
}
