//! Dashboard and webhook receiver for the Green-API bridge.
//!
//! Serves a server-rendered page for sending messages and browsing the log,
//! a webhook endpoint for pushed notifications and a sync endpoint that
//! drains the gateway's polling queue.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use database::Database;
use green_api::GreenClient;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting dashboard");

    if let Err(err) = config.green.endpoint_url("getStateInstance") {
        warn!(
            error = %err,
            "Set GREEN_API_URL, GREEN_INSTANCE_ID and GREEN_API_TOKEN; sends and syncs will fail"
        );
    }

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Gateway client
    let client = GreenClient::new(config.green.clone())?;

    // Build application state
    let state = AppState::new(db, Arc::new(client), config.max_pull);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Dashboard listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
