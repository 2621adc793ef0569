use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::{state::AppState, types::*};

#[derive(Debug, Deserialize)]
pub struct OddsQuery {
    pub date: String,
}

/// GET /api/game-days
pub async fn get_game_days(
    State(state): State<AppState>,
) -> std::result::Result<Json<GameDaysResponse>, (StatusCode, String)> {
    let dates = state
        .odds
        .game_days()
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    Ok(Json(GameDaysResponse { dates }))
}

/// GET /api/odds?date=YYYY-MM-DD
pub async fn get_odds(
    State(state): State<AppState>,
    Query(query): Query<OddsQuery>,
) -> std::result::Result<Json<OddsResponse>, (StatusCode, String)> {
    let parsed = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("invalid date '{}', expected YYYY-MM-DD", query.date),
        )
    })?;

    let rows = state.odds.rows_for(parsed);
    if rows.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("no games found for {}", query.date),
        ));
    }

    Ok(Json(OddsResponse {
        date: query.date,
        games: rows.into_iter().map(OddsRow::from).collect(),
    }))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
