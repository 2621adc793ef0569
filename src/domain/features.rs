use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable ordering of the engineered feature columns. The model artifact
/// records this list and refuses to score rows built with a different one.
pub const FEATURE_NAMES: &[&str] = &[
    "roll_pts_diff",
    "roll_win_diff",
    "roll_pd_diff",
    "roll_fg_pct_diff",
    "roll_fg3_pct_diff",
    "roll_ft_pct_diff",
    "roll_reb_diff",
    "roll_ast_diff",
    "roll_tov_diff",
    "rest_days_home",
    "rest_days_away",
    "back_to_back_home",
    "back_to_back_away",
    "travel_km_home",
    "travel_km_away",
    "injury_minutes_diff",
    "net_rating_diff",
    "pace_diff",
    "open_spread_home",
    "open_ml_home",
    "implied_home",
];

/// One row per game: identifiers, training label, and the engineered
/// differential/aggregate features. Raw per-team absolutes are intermediate
/// and never stored here. Every value is computable strictly before the
/// game's tip-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub home_abbrev: String,
    pub away_abbrev: String,
    /// Training label; `None` for games not yet played.
    pub home_win: Option<bool>,

    // Rolling home-minus-away differentials (None below the min-games bar)
    pub roll_pts_diff: Option<f64>,
    pub roll_win_diff: Option<f64>,
    pub roll_pd_diff: Option<f64>,
    pub roll_fg_pct_diff: Option<f64>,
    pub roll_fg3_pct_diff: Option<f64>,
    pub roll_ft_pct_diff: Option<f64>,
    pub roll_reb_diff: Option<f64>,
    pub roll_ast_diff: Option<f64>,
    pub roll_tov_diff: Option<f64>,

    // Schedule features
    pub rest_days_home: Option<f64>,
    pub rest_days_away: Option<f64>,
    pub back_to_back_home: Option<f64>,
    pub back_to_back_away: Option<f64>,
    pub travel_km_home: Option<f64>,
    pub travel_km_away: Option<f64>,
    pub injury_minutes_diff: Option<f64>,

    // Season advanced-ratings differentials
    pub net_rating_diff: Option<f64>,
    pub pace_diff: Option<f64>,

    // Opening Vegas line (left-joined; None when unmatched)
    pub open_spread_home: Option<f64>,
    pub open_ml_home: Option<f64>,
    pub implied_home: Option<f64>,
}

impl FeatureRow {
    /// Feature values in `FEATURE_NAMES` order.
    pub fn feature_vector(&self) -> Vec<Option<f64>> {
        vec![
            self.roll_pts_diff,
            self.roll_win_diff,
            self.roll_pd_diff,
            self.roll_fg_pct_diff,
            self.roll_fg3_pct_diff,
            self.roll_ft_pct_diff,
            self.roll_reb_diff,
            self.roll_ast_diff,
            self.roll_tov_diff,
            self.rest_days_home,
            self.rest_days_away,
            self.back_to_back_home,
            self.back_to_back_away,
            self.travel_km_home,
            self.travel_km_away,
            self.injury_minutes_diff,
            self.net_rating_diff,
            self.pace_diff,
            self.open_spread_home,
            self.open_ml_home,
            self.implied_home,
        ]
    }
}

/// The published feature-table artifact: one row per game, chronological.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureTable {
    pub feature_names: Vec<String>,
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows with a known outcome, usable for training and calibration.
    pub fn labeled(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter().filter(|r| r.home_win.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_vector_matches_names() {
        let row = FeatureRow {
            game_id: 1,
            game_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            home_abbrev: "BOS".into(),
            away_abbrev: "MIA".into(),
            home_win: Some(true),
            roll_pts_diff: Some(3.2),
            roll_win_diff: Some(0.2),
            roll_pd_diff: Some(4.1),
            roll_fg_pct_diff: None,
            roll_fg3_pct_diff: None,
            roll_ft_pct_diff: None,
            roll_reb_diff: None,
            roll_ast_diff: None,
            roll_tov_diff: None,
            rest_days_home: Some(2.0),
            rest_days_away: Some(0.0),
            back_to_back_home: Some(0.0),
            back_to_back_away: Some(1.0),
            travel_km_home: Some(0.0),
            travel_km_away: Some(1200.0),
            injury_minutes_diff: None,
            net_rating_diff: None,
            pace_diff: None,
            open_spread_home: None,
            open_ml_home: None,
            implied_home: None,
        };
        assert_eq!(row.feature_vector().len(), FEATURE_NAMES.len());
    }
}
