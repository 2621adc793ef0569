//! Dataset loading against the configured paths.
//!
//! Required files that are absent produce a `MissingInput` error naming
//! the command that regenerates them. Optional enrichment files (openers,
//! ratings) degrade to empty with a warning, matching how the feature
//! builder treats their absence per row.

use tracing::{info, warn};

use crate::calibration::IsotonicCalibrator;
use crate::config::DataConfig;
use crate::domain::{FeatureTable, GameLog, OddsTable, OpeningLine, TeamRatings};
use crate::error::{HardwoodError, Result};
use crate::model::ModelArtifact;
use crate::store::artifacts::{load_json, save_json};

/// Handle over the configured data directory.
pub struct Datasets {
    config: DataConfig,
}

impl Datasets {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Raw game log, required by the feature build.
    pub fn load_games(&self) -> Result<Vec<GameLog>> {
        if !self.config.games_path.exists() {
            return Err(HardwoodError::missing_input(
                &self.config.games_path,
                "export the season game log to this path before building features",
            ));
        }
        let games: Vec<GameLog> = load_json(&self.config.games_path)?;
        info!("loaded {} game logs", games.len());
        Ok(games)
    }

    /// Opening lines are enrichment only; a missing file is an empty set.
    pub fn load_openers(&self) -> Result<Vec<OpeningLine>> {
        if !self.config.openers_path.exists() {
            warn!(
                "openers file {} not found, opener features will be null",
                self.config.openers_path.display()
            );
            return Ok(Vec::new());
        }
        let openers: Vec<OpeningLine> = load_json(&self.config.openers_path)?;
        info!("loaded {} opening lines", openers.len());
        Ok(openers)
    }

    /// Season ratings are enrichment only; a missing file is an empty set.
    pub fn load_ratings(&self) -> Result<Vec<TeamRatings>> {
        if !self.config.ratings_path.exists() {
            warn!(
                "ratings file {} not found, rating features will be null",
                self.config.ratings_path.display()
            );
            return Ok(Vec::new());
        }
        let ratings: Vec<TeamRatings> = load_json(&self.config.ratings_path)?;
        info!("loaded ratings for {} teams", ratings.len());
        Ok(ratings)
    }

    pub fn load_features(&self) -> Result<FeatureTable> {
        if !self.config.features_path.exists() {
            return Err(HardwoodError::missing_input(
                &self.config.features_path,
                "hardwood build-features",
            ));
        }
        load_json(&self.config.features_path)
    }

    pub fn save_features(&self, table: &FeatureTable) -> Result<()> {
        save_json(&self.config.features_path, table)
    }

    pub fn load_model(&self) -> Result<ModelArtifact> {
        if !self.config.model_path.exists() {
            return Err(HardwoodError::missing_input(
                &self.config.model_path,
                "hardwood train",
            ));
        }
        ModelArtifact::from_file(&self.config.model_path)
    }

    pub fn save_model(&self, artifact: &ModelArtifact) -> Result<()> {
        save_json(&self.config.model_path, artifact)
    }

    /// Calibrator load honors the load-or-fit fallback: when the artifact
    /// is missing, a fresh fit from `pairs` stands in.
    pub fn load_or_fit_calibrator(&self, pairs: &[(f64, bool)]) -> Result<IsotonicCalibrator> {
        IsotonicCalibrator::load_or_fit(&self.config.calibrator_path, pairs)
    }

    pub fn save_calibrator(&self, calibrator: &IsotonicCalibrator) -> Result<()> {
        save_json(&self.config.calibrator_path, calibrator)
    }

    pub fn load_odds(&self) -> Result<OddsTable> {
        if !self.config.odds_path.exists() {
            return Err(HardwoodError::missing_input(
                &self.config.odds_path,
                "hardwood price",
            ));
        }
        load_json(&self.config.odds_path)
    }

    pub fn save_odds(&self, table: &OddsTable) -> Result<()> {
        save_json(&self.config.odds_path, table)
    }
}
