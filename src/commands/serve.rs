use tokio::signal;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::Datasets;

/// Serve the published odds table over HTTP until Ctrl+C.
pub async fn run(config: &AppConfig, bind_override: Option<String>) -> Result<()> {
    let datasets = Datasets::new(config.data.clone());
    let odds = datasets.load_odds()?;
    info!(
        "serving {} priced games across {} game days",
        odds.len(),
        odds.game_days().len()
    );

    let state = AppState::new(odds);
    let router = create_router(state);

    let bind = bind_override.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("odds API listening on {bind}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("odds API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown signal received");
}
