//! Money-line market maker.
//!
//! Turns calibrated home-win probabilities into two-sided American lines:
//! shrink toward 50/50, add a small deterministic probability jitter, clip
//! to the postable band, convert both sides, then jitter the lines
//! themselves. Both jitter streams are seeded from the game id, so a
//! repricing run reproduces the same book exactly.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::PricingConfig;
use crate::domain::PricedGame;
use crate::error::{HardwoodError, Result};
use crate::pricing::american::prob_to_american;

/// Seed offset separating the odds-jitter stream from the
/// probability-jitter stream for the same game.
const ODDS_JITTER_SEED_OFFSET: u64 = 17;

/// One game awaiting a price.
#[derive(Debug, Clone)]
pub struct PricingInput {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub home_abbrev: String,
    pub away_abbrev: String,
    /// Calibrated home-win probability.
    pub p_home: f64,
}

/// Outcome of a batch pricing run.
#[derive(Debug, Clone)]
pub enum PricingRun {
    /// No games were offered to price.
    NothingToPrice,
    Priced {
        rows: Vec<PricedGame>,
        /// Inputs dropped for carrying unpriceable probabilities.
        skipped: usize,
    },
}

pub struct MarketMaker {
    config: PricingConfig,
}

impl MarketMaker {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Price a single game. Fails only when the (shrunk, jittered, clipped)
    /// probability still cannot convert, which happens exactly when the
    /// input probability is non-finite.
    pub fn price_game(&self, input: &PricingInput) -> Result<PricedGame> {
        let cfg = &self.config;

        let shrunk = 0.5 + cfg.shrink * (input.p_home - 0.5);

        let mut prob_rng = StdRng::seed_from_u64(input.game_id as u64);
        let jittered = shrunk + prob_rng.gen_range(-cfg.prob_jitter..=cfg.prob_jitter);

        let p_home = jittered.clamp(cfg.prob_floor, cfg.prob_ceil);
        let p_away = 1.0 - p_home;

        let ml_home = prob_to_american(p_home)?;
        let ml_away = prob_to_american(p_away)?;

        // One factor per game, applied to both sides, so the two magnitudes
        // move together
        let mut odds_rng =
            StdRng::seed_from_u64((input.game_id as u64).wrapping_add(ODDS_JITTER_SEED_OFFSET));
        let factor = odds_rng.gen_range(1.0 - cfg.odds_jitter..=1.0 + cfg.odds_jitter);
        let ml_home = jitter_line(ml_home, factor);
        let ml_away = jitter_line(ml_away, factor);

        Ok(PricedGame {
            game_id: input.game_id,
            game_date: input.game_date,
            home_abbrev: input.home_abbrev.clone(),
            away_abbrev: input.away_abbrev.clone(),
            ml_home,
            ml_away,
            p_home: round3(p_home),
            p_away: round3(p_away),
        })
    }

    /// Price a batch. Unpriceable inputs are skipped with a warning rather
    /// than failing the whole slate.
    pub fn price_batch(&self, inputs: &[PricingInput]) -> PricingRun {
        if inputs.is_empty() {
            info!("no games offered for pricing");
            return PricingRun::NothingToPrice;
        }
        let mut rows = Vec::with_capacity(inputs.len());
        let mut skipped = 0usize;
        for input in inputs {
            match self.price_game(input) {
                Ok(priced) => rows.push(priced),
                Err(HardwoodError::InvalidProbability(p)) => {
                    warn!(
                        "skipping game {} ({} vs {}): unpriceable probability {p}",
                        input.game_id, input.home_abbrev, input.away_abbrev
                    );
                    skipped += 1;
                }
                Err(err) => {
                    warn!("skipping game {}: {err}", input.game_id);
                    skipped += 1;
                }
            }
        }
        info!("priced {} games, skipped {}", rows.len(), skipped);
        PricingRun::Priced { rows, skipped }
    }
}

/// Multiplicative jitter on the magnitude of a line, sign preserved.
fn jitter_line(ml: i64, factor: f64) -> i64 {
    let magnitude = (ml.abs() as f64 * factor).round() as i64;
    magnitude * ml.signum()
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
