//! Odds API behavior against an in-memory table.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use hardwood::api::{create_router, AppState};
use hardwood::domain::{OddsTable, PricedGame};
use serde_json::Value;
use tower::ServiceExt;

fn sample_table() -> OddsTable {
    let priced = |id: i64, date: &str, home: &str, away: &str| PricedGame {
        game_id: id,
        game_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        home_abbrev: home.into(),
        away_abbrev: away.into(),
        ml_home: -213,
        ml_away: 213,
        p_home: 0.68,
        p_away: 0.32,
    };
    OddsTable::new(vec![
        priced(1, "2024-01-15", "BOS", "MIA"),
        priced(2, "2024-01-15", "DEN", "LAL"),
        priced(3, "2024-01-17", "NYK", "PHI"),
    ])
}

async fn get(path: &str) -> (StatusCode, Value) {
    let router = create_router(AppState::new(sample_table()));
    let response = router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn lists_game_days_sorted_and_distinct() {
    let (status, body) = get("/api/game-days").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["dates"],
        serde_json::json!(["2024-01-15", "2024-01-17"])
    );
}

#[tokio::test]
async fn returns_the_full_slate_for_a_date() {
    let (status, body) = get("/api/odds?date=2024-01-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-01-15");
    let games = body["games"].as_array().unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0]["home_abbrev"], "BOS");
    assert_eq!(games[0]["ml_home"], -213);
    assert_eq!(games[0]["p_home"], 0.68);
}

#[tokio::test]
async fn unknown_date_is_404() {
    let (status, _) = get("/api/odds?date=2024-06-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_date_is_400() {
    let (status, _) = get("/api/odds?date=not-a-date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/odds?date=2024-13-40").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // missing parameter entirely
    let (status, _) = get("/api/odds").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let router = create_router(AppState::new(sample_table()));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
