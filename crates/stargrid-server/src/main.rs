//! Server binary for the stargrid game.
//!
//! # Startup sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration (`STARGRID_CONFIG`, else `stargrid.yaml`, else
//!    built-in defaults)
//! 3. Build the shared application state (empty game registry)
//! 4. Serve the game API until terminated

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stargrid_core::GameConfig;
use stargrid_server::{AppState, start_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point for the game server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("stargrid-server starting");

    let config = load_config();
    info!(
        rows = config.grid.rows,
        cols = config.grid.cols,
        players = config.players,
        stars = config.stars,
        policy = ?config.conflict_policy,
        strategy_timeout_ms = config.strategy_timeout_ms,
        "configuration loaded"
    );

    let server_config = config.server.clone();
    let state = Arc::new(AppState::new(config));

    start_server(&server_config, state).await?;

    Ok(())
}

/// Load configuration from disk, falling back to built-in defaults.
///
/// A configured-but-broken file is reported and replaced by defaults so
/// the server still comes up.
fn load_config() -> GameConfig {
    let path = std::env::var("STARGRID_CONFIG")
        .map_or_else(|_| PathBuf::from("stargrid.yaml"), PathBuf::from);

    if Path::new(&path).exists() {
        match GameConfig::from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "configuration file loaded");
                config
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "bad config file, using defaults");
                GameConfig::default()
            }
        }
    } else {
        info!("no configuration file, using defaults");
        GameConfig::default()
    }
}
