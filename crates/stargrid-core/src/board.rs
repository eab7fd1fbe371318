//! Initial board generation: player spawns and star placement.
//!
//! Players are placed by rejection sampling so that every pair starts at
//! Manhattan distance >= `player_spacing`; stars land on distinct tiles
//! strictly farther than `star_clearance` from every player, so nobody
//! scores on tick one without moving. Sampling is attempt-bounded: a
//! configuration too dense to satisfy (many players on a tiny board)
//! reports [`BoardError::PlacementExhausted`] instead of spinning.

use std::collections::BTreeSet;

use rand::Rng;
use stargrid_types::{GameState, GridDims, Position};

use crate::config::GameConfig;

/// Upper bound on total sampling attempts per placement phase.
const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

/// Errors that can occur while generating a board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Rejection sampling gave up before satisfying the constraints.
    #[error("could not place {kind} after {attempts} attempts; board too dense")]
    PlacementExhausted {
        /// What was being placed (`"players"` or `"stars"`).
        kind: &'static str,
        /// How many samples were drawn before giving up.
        attempts: u32,
    },
}

/// Generate starting player positions and the star set for a new game.
///
/// All coordinates are in bounds; players are pairwise spaced; stars are
/// distinct and clear of every player's starting neighborhood.
pub fn generate_board<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<(Vec<Position>, BTreeSet<Position>), BoardError> {
    let mut players: Vec<Position> = Vec::with_capacity(config.players);
    let mut attempts: u32 = 0;
    while players.len() < config.players {
        attempts = attempts.saturating_add(1);
        if attempts > MAX_PLACEMENT_ATTEMPTS {
            return Err(BoardError::PlacementExhausted {
                kind: "players",
                attempts,
            });
        }
        let candidate = random_cell(config.grid, rng);
        if players
            .iter()
            .all(|p| p.manhattan_distance(candidate) >= config.player_spacing)
        {
            players.push(candidate);
        }
    }

    let mut stars: BTreeSet<Position> = BTreeSet::new();
    attempts = 0;
    while stars.len() < config.stars {
        attempts = attempts.saturating_add(1);
        if attempts > MAX_PLACEMENT_ATTEMPTS {
            return Err(BoardError::PlacementExhausted {
                kind: "stars",
                attempts,
            });
        }
        let candidate = random_cell(config.grid, rng);
        let clear_of_players = players
            .iter()
            .all(|p| p.manhattan_distance(candidate) > config.star_clearance);
        if clear_of_players {
            // The set ignores duplicate tiles on its own.
            stars.insert(candidate);
        }
    }

    Ok((players, stars))
}

/// Generate the full starting state of a new game (zero scores).
pub fn generate_state<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameState, BoardError> {
    let (players, stars) = generate_board(config, rng)?;
    Ok(GameState::new(players, stars))
}

/// A uniformly random in-bounds cell.
fn random_cell<R: Rng + ?Sized>(dims: GridDims, rng: &mut R) -> Position {
    Position::new(
        rng.random_range(0..dims.rows),
        rng.random_range(0..dims.cols),
    )
}
