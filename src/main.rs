//! Service entry point.

use std::net::SocketAddr;

use slacktime::api::{AppState, create_router};
use slacktime::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    std::fs::create_dir_all(&config.output_dir)?;

    info!(
        %addr,
        output_dir = %config.output_dir.display(),
        timezone = %config.timezone,
        "starting slacktime server"
    );

    let state = AppState::new(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
