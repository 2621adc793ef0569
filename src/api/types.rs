//! JSON response shapes for the odds API.

use serde::{Deserialize, Serialize};

use crate::domain::PricedGame;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDaysResponse {
    /// ISO dates (YYYY-MM-DD), ascending.
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsRow {
    pub game_id: i64,
    pub game_date: String,
    pub home_abbrev: String,
    pub away_abbrev: String,
    pub ml_home: i64,
    pub ml_away: i64,
    /// `null` if the stored probability is somehow non-finite, so the
    /// payload stays valid JSON.
    pub p_home: Option<f64>,
    pub p_away: Option<f64>,
}

impl From<&PricedGame> for OddsRow {
    fn from(row: &PricedGame) -> Self {
        Self {
            game_id: row.game_id,
            game_date: row.game_date.format("%Y-%m-%d").to_string(),
            home_abbrev: row.home_abbrev.clone(),
            away_abbrev: row.away_abbrev.clone(),
            ml_home: row.ml_home,
            ml_away: row.ml_away,
            p_home: finite_or_none(row.p_home),
            p_away: finite_or_none(row.p_away),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsResponse {
    pub date: String,
    pub games: Vec<OddsRow>,
}

fn finite_or_none(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
