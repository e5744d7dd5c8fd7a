//! StintFuel Server
//!
//! Polls the active telemetry source, ticks the fuel engine and serves the
//! results over a REST/SSE API.

use anyhow::Result;
use std::net::SocketAddr;
use stintfuel_server::{api, monitor, state};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting StintFuel Server");

    // Create application state
    let state = state::AppState::new();

    // Build the router
    let app = api::create_router(state.clone());

    // Start the telemetry monitor in the background
    tokio::spawn(monitor::run(state.clone()));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 9200));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
