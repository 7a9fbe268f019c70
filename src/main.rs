use anyhow::Context;
use tracing_subscriber::EnvFilter;

use restoro_site::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up GATEWAY_URL, NOTIFY_BOT_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();
    tracing::info!("Starting Restoro site in {:?} mode", config.environment);
    if restoro_site::is_development!() {
        tracing::info!("Development defaults active; set APP_ENV=production for the hosted backend");
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::from_config(config).context("failed to build application state")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Restoro site listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
