//! Shared application state: the game registry.
//!
//! [`AppState`] owns the process-wide table of live games. Each entry
//! records what the server is authoritative for -- the player count, the
//! strategy lineup, and the accumulated scores -- while positions and the
//! star set travel with every step request (the caller prunes collected
//! stars, so star lifecycle stays out of the core, and the same game can
//! be driven by any number of viewers sharing its id).
//!
//! Each game's mutable progress sits behind its own async [`Mutex`], so at
//! most one tick per game is ever in flight while distinct games step
//! concurrently. There is no deletion endpoint; games live exactly as long
//! as the process that registered them.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use stargrid_core::{BoardError, GameConfig, generate_state};
use stargrid_strategy::StrategyRegistry;
use stargrid_types::{GameId, GameState};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// The per-game mutable progress, guarded as one unit.
#[derive(Debug)]
pub struct GameProgress {
    /// Accumulated score per player, index-aligned.
    pub scores: Vec<u32>,
    /// Number of ticks this game has resolved.
    pub ticks: u64,
}

/// One registered game.
#[derive(Debug)]
pub struct GameEntry {
    /// Fixed number of players for this game's lifetime.
    pub player_count: usize,
    /// The strategy lineup, one slot per player.
    pub registry: StrategyRegistry,
    /// Scores and tick counter, serialized per game by this lock.
    pub progress: Mutex<GameProgress>,
    /// When the game was created.
    pub created_at: DateTime<Utc>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// Live games keyed by id.
    pub games: RwLock<BTreeMap<GameId, Arc<GameEntry>>>,
    /// Deployment configuration (board, policy, timeout, lineup).
    pub config: GameConfig,
}

impl AppState {
    /// Create application state with an empty game table.
    pub fn new(config: GameConfig) -> Self {
        Self {
            games: RwLock::new(BTreeMap::new()),
            config,
        }
    }

    /// Create and register a new game with `players` players.
    ///
    /// Generates the starting board, builds the game's strategy lineup
    /// from the configured names, and returns the id together with the
    /// initial state (zero scores).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the board constraints cannot be
    /// satisfied for this player count.
    pub async fn create_game(&self, players: usize) -> Result<(GameId, GameState), BoardError> {
        let board_config = GameConfig {
            players,
            ..self.config.clone()
        };
        let state = generate_state(&board_config, &mut rand::rng())?;

        let id = GameId::new();
        let entry = Arc::new(GameEntry {
            player_count: players,
            registry: StrategyRegistry::from_names(
                &self.config.strategies,
                players,
                self.config.grid,
            ),
            progress: Mutex::new(GameProgress {
                scores: state.scores.clone(),
                ticks: 0,
            }),
            created_at: Utc::now(),
        });

        self.games.write().await.insert(id, entry);
        info!(game_id = %id, players, "game created");

        Ok((id, state))
    }

    /// Look up a game by id.
    pub async fn get_game(&self, id: GameId) -> Option<Arc<GameEntry>> {
        self.games.read().await.get(&id).cloned()
    }

    /// Number of registered games.
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}
