//! Leakage-free rolling feature construction.
//!
//! One pass over the game log in chronological order. For each game the
//! builder reads every team's window *as it stood before tip-off*, emits
//! the feature row, and only then folds the game's result back into the
//! windows (shift-then-roll). Appending future games can therefore never
//! change an already-emitted row.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::FeatureConfig;
use crate::domain::{
    arena_coords, distance_km, FeatureRow, FeatureTable, GameLog, OpeningLine, TeamGameRecord,
    TeamRatings,
};

/// Rolling aggregates for one team immediately before a game.
#[derive(Debug, Clone, Copy, Default)]
struct Snapshot {
    pts: f64,
    win_rate: f64,
    point_diff: f64,
    fg_pct: f64,
    fg3_pct: f64,
    ft_pct: f64,
    reb: f64,
    ast: f64,
    tov: f64,
    injury_minutes: f64,
}

/// Per-team rolling state: the trailing window plus schedule bookkeeping.
struct TeamState {
    window: VecDeque<TeamGameRecord>,
    capacity: usize,
    last_game_date: Option<NaiveDate>,
    last_arena: Option<String>,
}

impl TeamState {
    fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            last_game_date: None,
            last_arena: None,
        }
    }

    fn push(&mut self, record: TeamGameRecord) {
        self.last_game_date = Some(record.game_date);
        self.last_arena = Some(record.arena.clone());
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(record);
    }

    /// Mean of each stat over the window, `None` below the min-games bar.
    fn snapshot(&self, min_games: usize, roster_minutes: f64) -> Option<Snapshot> {
        if self.window.len() < min_games {
            return None;
        }
        let n = self.window.len() as f64;
        let mut snap = Snapshot::default();
        for rec in &self.window {
            snap.pts += rec.stats.pts;
            snap.win_rate += if rec.win { 1.0 } else { 0.0 };
            snap.point_diff += rec.point_diff;
            snap.fg_pct += rec.stats.fg_pct;
            snap.fg3_pct += rec.stats.fg3_pct;
            snap.ft_pct += rec.stats.ft_pct;
            snap.reb += rec.stats.reb;
            snap.ast += rec.stats.ast;
            snap.tov += rec.stats.tov;
            snap.injury_minutes += rec
                .stats
                .player_minutes
                .map(|m| (roster_minutes - m).max(0.0))
                .unwrap_or(0.0);
        }
        snap.pts /= n;
        snap.win_rate /= n;
        snap.point_diff /= n;
        snap.fg_pct /= n;
        snap.fg3_pct /= n;
        snap.ft_pct /= n;
        snap.reb /= n;
        snap.ast /= n;
        snap.tov /= n;
        snap.injury_minutes /= n;
        Some(snap)
    }

    /// Days of rest before a game on `date`: a game yesterday is zero rest
    /// (back-to-back). Sentinel when no prior game is tracked.
    fn rest_days(&self, date: NaiveDate, sentinel: f64) -> f64 {
        match self.last_game_date {
            Some(prev) => ((date - prev).num_days() as f64 - 1.0).max(0.0),
            None => sentinel,
        }
    }

    /// Great-circle km from the previous game's arena to `arena`.
    fn travel_km(&self, arena: &str) -> Option<f64> {
        let from = arena_coords(self.last_arena.as_deref()?)?;
        let to = arena_coords(arena)?;
        Some(distance_km(from, to))
    }
}

pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Build one feature row per game. `games` may arrive unsorted; they
    /// are ordered by date with input order as the tiebreak, so same-day
    /// slates stay leakage-free relative to each other.
    pub fn build(
        &self,
        mut games: Vec<GameLog>,
        openers: &[OpeningLine],
        ratings: &[TeamRatings],
    ) -> FeatureTable {
        // sort_by_key is stable: equal dates keep input order
        games.sort_by_key(|g| g.game_date);

        let opener_index: HashMap<(NaiveDate, &str, &str), &OpeningLine> = openers
            .iter()
            .map(|o| {
                (
                    (o.game_date, o.home_abbrev.as_str(), o.away_abbrev.as_str()),
                    o,
                )
            })
            .collect();
        let rating_index: HashMap<&str, &TeamRatings> =
            ratings.iter().map(|r| (r.team.as_str(), r)).collect();

        let mut states: HashMap<String, TeamState> = HashMap::new();
        let mut rows = Vec::with_capacity(games.len());
        let mut skipped = 0usize;

        for log in &games {
            if let Some(game) = log.completed() {
                if let Err(reason) = game.validate() {
                    warn!("skipping malformed game log: {reason}");
                    skipped += 1;
                    continue;
                }
            }

            let row = self.build_row(log, &states, &opener_index, &rating_index);
            rows.push(row);

            // Fold the result in only after the row is emitted
            if let Some(game) = log.completed() {
                let (home_rec, away_rec) = game.perspectives();
                states
                    .entry(game.home_abbrev.clone())
                    .or_insert_with(|| TeamState::new(self.config.window))
                    .push(home_rec);
                states
                    .entry(game.away_abbrev.clone())
                    .or_insert_with(|| TeamState::new(self.config.window))
                    .push(away_rec);
            }
        }

        if skipped > 0 {
            warn!("feature build skipped {skipped} malformed game logs");
        }
        info!(
            "built {} feature rows across {} teams",
            rows.len(),
            states.len()
        );
        FeatureTable::new(rows)
    }

    fn build_row(
        &self,
        log: &GameLog,
        states: &HashMap<String, TeamState>,
        openers: &HashMap<(NaiveDate, &str, &str), &OpeningLine>,
        ratings: &HashMap<&str, &TeamRatings>,
    ) -> FeatureRow {
        let cfg = &self.config;
        let home_state = states.get(&log.home_abbrev);
        let away_state = states.get(&log.away_abbrev);

        let home_snap =
            home_state.and_then(|s| s.snapshot(cfg.min_games, cfg.roster_minutes_baseline));
        let away_snap =
            away_state.and_then(|s| s.snapshot(cfg.min_games, cfg.roster_minutes_baseline));

        let diff = |f: fn(&Snapshot) -> f64| -> Option<f64> {
            match (&home_snap, &away_snap) {
                (Some(h), Some(a)) => Some(f(h) - f(a)),
                _ => None,
            }
        };

        let rest_home = home_state
            .map(|s| s.rest_days(log.game_date, cfg.rest_sentinel_days))
            .unwrap_or(cfg.rest_sentinel_days);
        let rest_away = away_state
            .map(|s| s.rest_days(log.game_date, cfg.rest_sentinel_days))
            .unwrap_or(cfg.rest_sentinel_days);

        // Both teams travel to the home side's arena
        let travel_home = home_state.and_then(|s| s.travel_km(&log.home_abbrev));
        let travel_away = away_state.and_then(|s| s.travel_km(&log.home_abbrev));

        let opener = openers
            .get(&(
                log.game_date,
                log.home_abbrev.as_str(),
                log.away_abbrev.as_str(),
            ))
            .copied();
        if opener.is_none() {
            debug!(
                "no opening line for {} {} vs {}",
                log.game_date, log.home_abbrev, log.away_abbrev
            );
        }

        let rating_diff = |f: fn(&TeamRatings) -> f64| -> Option<f64> {
            match (
                ratings.get(log.home_abbrev.as_str()),
                ratings.get(log.away_abbrev.as_str()),
            ) {
                (Some(h), Some(a)) => Some(f(h) - f(a)),
                _ => None,
            }
        };

        FeatureRow {
            game_id: log.game_id,
            game_date: log.game_date,
            home_abbrev: log.home_abbrev.clone(),
            away_abbrev: log.away_abbrev.clone(),
            home_win: log.completed().map(|g| g.home_win()),

            roll_pts_diff: diff(|s| s.pts),
            roll_win_diff: diff(|s| s.win_rate),
            roll_pd_diff: diff(|s| s.point_diff),
            roll_fg_pct_diff: diff(|s| s.fg_pct),
            roll_fg3_pct_diff: diff(|s| s.fg3_pct),
            roll_ft_pct_diff: diff(|s| s.ft_pct),
            roll_reb_diff: diff(|s| s.reb),
            roll_ast_diff: diff(|s| s.ast),
            roll_tov_diff: diff(|s| s.tov),

            rest_days_home: Some(rest_home),
            rest_days_away: Some(rest_away),
            back_to_back_home: Some(if rest_home == 0.0 { 1.0 } else { 0.0 }),
            back_to_back_away: Some(if rest_away == 0.0 { 1.0 } else { 0.0 }),
            travel_km_home: travel_home,
            travel_km_away: travel_away,
            injury_minutes_diff: diff(|s| s.injury_minutes),

            net_rating_diff: rating_diff(|r| r.net_rating),
            pace_diff: rating_diff(|r| r.pace),

            open_spread_home: opener.and_then(|o| o.open_spread_home),
            open_ml_home: opener.and_then(|o| o.open_ml_home),
            implied_home: opener.and_then(|o| o.implied_home),
        }
    }
}
