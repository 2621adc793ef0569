use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw ingestion shape: one scheduled or completed game per entry. Box
/// scores are absent for games not yet played; those rows still get
/// featured (for live pricing) but never enter a rolling window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLog {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub home_abbrev: String,
    pub away_abbrev: String,
    #[serde(default)]
    pub home: Option<BoxScore>,
    #[serde(default)]
    pub away: Option<BoxScore>,
}

impl GameLog {
    /// The completed-game view, when both box scores are present.
    pub fn completed(&self) -> Option<Game> {
        match (self.home, self.away) {
            (Some(home), Some(away)) => Some(Game {
                game_id: self.game_id,
                game_date: self.game_date,
                home_abbrev: self.home_abbrev.clone(),
                away_abbrev: self.away_abbrev.clone(),
                home,
                away,
            }),
            _ => None,
        }
    }
}

/// One team's box score line for a single game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxScore {
    pub pts: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
    pub reb: f64,
    pub ast: f64,
    pub tov: f64,
    /// Total player-minutes logged by the roster (injury proxy input).
    #[serde(default)]
    pub player_minutes: Option<f64>,
}

/// One completed or scheduled game. `home_win` is only present once the
/// final score is known; future games carry `None` and are never used as
/// rolling-window history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub home_abbrev: String,
    pub away_abbrev: String,
    pub home: BoxScore,
    pub away: BoxScore,
}

impl Game {
    pub fn home_win(&self) -> bool {
        self.home.pts > self.away.pts
    }

    /// Point differential from the home side's perspective.
    pub fn point_diff_home(&self) -> f64 {
        self.home.pts - self.away.pts
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.home_abbrev == self.away_abbrev {
            return Err(format!(
                "game {} has identical home/away team {}",
                self.game_id, self.home_abbrev
            ));
        }
        for (side, box_score) in [("home", &self.home), ("away", &self.away)] {
            for (name, pct) in [
                ("fg_pct", box_score.fg_pct),
                ("fg3_pct", box_score.fg3_pct),
                ("ft_pct", box_score.ft_pct),
            ] {
                if !(0.0..=1.0).contains(&pct) {
                    return Err(format!(
                        "game {} {side} {name} {pct} outside [0, 1]",
                        self.game_id
                    ));
                }
            }
            if box_score.pts < 0.0 {
                return Err(format!("game {} {side} has negative points", self.game_id));
            }
        }
        Ok(())
    }

    /// Split the game into the two per-team perspective records that feed
    /// the rolling windows.
    pub fn perspectives(&self) -> (TeamGameRecord, TeamGameRecord) {
        let home_win = self.home_win();
        let pd = self.point_diff_home();
        let home = TeamGameRecord {
            game_date: self.game_date,
            team: self.home_abbrev.clone(),
            arena: self.home_abbrev.clone(),
            is_home: true,
            win: home_win,
            point_diff: pd,
            stats: self.home,
        };
        let away = TeamGameRecord {
            game_date: self.game_date,
            team: self.away_abbrev.clone(),
            arena: self.home_abbrev.clone(),
            is_home: false,
            win: !home_win,
            point_diff: -pd,
            stats: self.away,
        };
        (home, away)
    }
}

/// One team's perspective of one completed game. The game is always played
/// at the home side's arena, recorded here for travel-distance tracking.
#[derive(Debug, Clone)]
pub struct TeamGameRecord {
    pub game_date: NaiveDate,
    pub team: String,
    /// Arena the game was played at (home team's abbrev).
    pub arena: String,
    pub is_home: bool,
    pub win: bool,
    pub point_diff: f64,
    pub stats: BoxScore,
}

/// Externally supplied opening Vegas line, matched by (date, home, away).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningLine {
    pub game_date: NaiveDate,
    pub home_abbrev: String,
    pub away_abbrev: String,
    #[serde(default)]
    pub open_spread_home: Option<f64>,
    #[serde(default)]
    pub open_ml_home: Option<f64>,
    #[serde(default)]
    pub implied_home: Option<f64>,
}

/// Season advanced-rating snapshot for one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRatings {
    pub team: String,
    pub off_rating: f64,
    pub def_rating: f64,
    pub net_rating: f64,
    pub pace: f64,
}
