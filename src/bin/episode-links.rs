use anyhow::Result;
use tracing_subscriber::prelude::*;

use episode_links::datasource::repository::seed;
use episode_links::state::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = ServerConfig::from_env()?;
    let app_state = AppState::new()?;
    sqlx::migrate!().run(&app_state.pool).await?;
    seed::seed_if_empty(&app_state.pool).await?;
    tracing::info!("database initialized");

    episode_links::serve_axum(app_state, server.socket_addr()?).await?;
    Ok(())
}
