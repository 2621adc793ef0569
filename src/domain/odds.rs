use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One priced game: American money-lines for both sides plus the shrunk,
/// jittered, clipped probabilities they were derived from. Probabilities
/// are display-rounded to 3 decimals; the pair summed to exactly 1.0
/// before rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedGame {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub home_abbrev: String,
    pub away_abbrev: String,
    pub ml_home: i64,
    pub ml_away: i64,
    pub p_home: f64,
    pub p_away: f64,
}

/// The published priced-odds artifact. Fully replaced on each pricing run,
/// never merged; readers treat a loaded table as immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OddsTable {
    pub rows: Vec<PricedGame>,
}

impl OddsTable {
    pub fn new(rows: Vec<PricedGame>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct game dates, ascending.
    pub fn game_days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.rows.iter().map(|r| r.game_date).collect();
        days.sort();
        days.dedup();
        days
    }

    pub fn rows_for(&self, date: NaiveDate) -> Vec<&PricedGame> {
        self.rows.iter().filter(|r| r.game_date == date).collect()
    }
}
