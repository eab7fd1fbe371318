//! Configuration loading and typed config structures for stargrid.
//!
//! The canonical configuration is a YAML file (`stargrid.yaml` by
//! default). This module defines strongly-typed structs mirroring the YAML
//! structure; every field has a default matching the reference deployment
//! (20x30 board, 6 players, 50 stars, 1 second strategy budget), so an
//! empty file -- or no file at all -- yields a playable game.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use stargrid_types::GridDims;

use crate::conflict::ConflictPolicy;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Board dimensions.
    #[serde(default)]
    pub grid: GridDims,

    /// Number of players per game (fixed at game creation).
    #[serde(default = "default_players")]
    pub players: usize,

    /// Number of star tiles placed at game creation.
    #[serde(default = "default_stars")]
    pub stars: usize,

    /// Minimum pairwise Manhattan distance between starting players.
    #[serde(default = "default_player_spacing")]
    pub player_spacing: u32,

    /// Stars start strictly farther than this from every player.
    #[serde(default = "default_star_clearance")]
    pub star_clearance: u32,

    /// Wall-clock budget for one strategy invocation, in milliseconds.
    #[serde(default = "default_strategy_timeout_ms")]
    pub strategy_timeout_ms: u64,

    /// How same-target and occupancy conflicts are resolved.
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,

    /// Strategy name per player slot; short lists pad with `hold`.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<String>,

    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,
}

const fn default_players() -> usize {
    6
}

const fn default_stars() -> usize {
    50
}

const fn default_player_spacing() -> u32 {
    5
}

const fn default_star_clearance() -> u32 {
    4
}

const fn default_strategy_timeout_ms() -> u64 {
    1000
}

fn default_strategies() -> Vec<String> {
    [
        "nearest_star",
        "random_walk",
        "nearest_star",
        "hold",
        "random_walk",
        "nearest_star",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridDims::default(),
            players: default_players(),
            stars: default_stars(),
            player_spacing: default_player_spacing(),
            star_clearance: default_star_clearance(),
            strategy_timeout_ms: default_strategy_timeout_ms(),
            conflict_policy: ConflictPolicy::default(),
            strategies: default_strategies(),
            server: ServerConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `STARGRID_HOST` / `STARGRID_PORT` environment variables override
    /// the server bind settings from the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// The per-strategy wall-clock budget as a [`Duration`].
    pub const fn strategy_timeout(&self) -> Duration {
        Duration::from_millis(self.strategy_timeout_ms)
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,
    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Override host and port from `STARGRID_HOST` / `STARGRID_PORT`.
    ///
    /// An unparsable `STARGRID_PORT` is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("STARGRID_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("STARGRID_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            self.port = port;
        }
    }
}
