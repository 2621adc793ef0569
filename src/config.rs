use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            features: FeatureConfig::default(),
            model: ModelConfig::default(),
            pricing: PricingConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// File locations for raw inputs and published artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Raw per-game box score log (JSON)
    pub games_path: PathBuf,
    /// Optional opening Vegas lines (JSON); missing file is not an error
    pub openers_path: PathBuf,
    /// Optional season advanced-ratings snapshot (JSON)
    pub ratings_path: PathBuf,
    /// Published feature table artifact
    pub features_path: PathBuf,
    /// Published model artifact
    pub model_path: PathBuf,
    /// Published isotonic calibrator artifact
    pub calibrator_path: PathBuf,
    /// Published priced-odds table artifact
    pub odds_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            games_path: PathBuf::from("data/external/games.json"),
            openers_path: PathBuf::from("data/external/openers.json"),
            ratings_path: PathBuf::from("data/external/team_ratings.json"),
            features_path: PathBuf::from("data/processed/rolling_features.json"),
            model_path: PathBuf::from("data/artifacts/model.json"),
            calibrator_path: PathBuf::from("data/artifacts/iso_calibrator.json"),
            odds_path: PathBuf::from("data/processed/predicted_odds.json"),
        }
    }
}

/// Rolling feature construction parameters
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureConfig {
    /// Trailing window length in games
    #[serde(default = "default_window")]
    pub window: usize,
    /// Prior games required before a rolling aggregate is valid
    #[serde(default = "default_min_games")]
    pub min_games: usize,
    /// Rest-day sentinel when a team has no tracked prior game
    #[serde(default = "default_rest_sentinel")]
    pub rest_sentinel_days: f64,
    /// Full-roster player-minutes baseline per game (injury proxy)
    #[serde(default = "default_roster_minutes")]
    pub roster_minutes_baseline: f64,
}

fn default_window() -> usize {
    10
}

fn default_min_games() -> usize {
    3
}

fn default_rest_sentinel() -> f64 {
    7.0
}

fn default_roster_minutes() -> f64 {
    240.0
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            min_games: default_min_games(),
            rest_sentinel_days: default_rest_sentinel(),
            roster_minutes_baseline: default_roster_minutes(),
        }
    }
}

/// Training hyperparameters for the logistic predictor
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_l2")]
    pub l2: f64,
    /// Seed for backtest cutoff selection
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_learning_rate() -> f64 {
    0.05
}

fn default_epochs() -> usize {
    400
}

fn default_l2() -> f64 {
    1e-4
}

fn default_seed() -> u64 {
    42
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            epochs: default_epochs(),
            l2: default_l2(),
            seed: default_seed(),
        }
    }
}

/// Probability-to-market tuning. The defaults correspond to a ±640 cap.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PricingConfig {
    /// Pull toward 0.50 (0.90 = keep 90% of the distance from even)
    #[serde(default = "default_shrink")]
    pub shrink: f64,
    /// Half-width of the deterministic probability jitter
    #[serde(default = "default_prob_jitter")]
    pub prob_jitter: f64,
    /// Probability floor after jitter
    #[serde(default = "default_prob_floor")]
    pub prob_floor: f64,
    /// Probability ceiling after jitter
    #[serde(default = "default_prob_ceil")]
    pub prob_ceil: f64,
    /// Half-width of the multiplicative money-line jitter
    #[serde(default = "default_odds_jitter")]
    pub odds_jitter: f64,
}

fn default_shrink() -> f64 {
    0.90
}

fn default_prob_jitter() -> f64 {
    0.01
}

fn default_prob_floor() -> f64 {
    0.135
}

fn default_prob_ceil() -> f64 {
    0.865
}

fn default_odds_jitter() -> f64 {
    0.05
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            shrink: default_shrink(),
            prob_jitter: default_prob_jitter(),
            prob_floor: default_prob_floor(),
            prob_ceil: default_prob_ceil(),
            odds_jitter: default_odds_jitter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(config_dir.join(
                    std::env::var("HARDWOOD_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (HARDWOOD_PRICING__SHRINK, etc.)
            .add_source(
                Environment::with_prefix("HARDWOOD")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.features.window == 0 {
            errors.push("features.window must be at least 1".to_string());
        }
        if self.features.min_games > self.features.window {
            errors.push(format!(
                "features.min_games ({}) cannot exceed features.window ({})",
                self.features.min_games, self.features.window
            ));
        }

        let p = &self.pricing;
        if !(0.0 < p.shrink && p.shrink <= 1.0) {
            errors.push("pricing.shrink must be in (0, 1]".to_string());
        }
        if !(0.0 < p.prob_floor && p.prob_floor < p.prob_ceil && p.prob_ceil < 1.0) {
            errors.push("pricing floor/ceiling must satisfy 0 < floor < ceiling < 1".to_string());
        }
        if p.prob_jitter < 0.0 || p.prob_jitter >= p.prob_floor {
            errors.push("pricing.prob_jitter must be non-negative and below the floor".to_string());
        }
        if !(0.0..1.0).contains(&p.odds_jitter) {
            errors.push("pricing.odds_jitter must be in [0, 1)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut config = AppConfig::default();
        config.pricing.prob_floor = 0.9;
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("floor")));
    }
}
