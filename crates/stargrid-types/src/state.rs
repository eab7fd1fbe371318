//! Game state: the value passed into and returned from each tick.
//!
//! A [`GameState`] bundles the three index-aligned facts about one game:
//! where every player stands, which tiles still carry a star, and what each
//! player has scored so far. The simulation core holds no state of its own
//! between ticks -- it consumes one `GameState` and produces the next.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::ids::PlayerId;

/// The complete state of one game at a tick boundary.
///
/// Invariant: `positions` and `scores` have the same length, and
/// [`PlayerId`] `i` owns index `i` in both. Stars are unique by
/// construction of the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current cell of each player, indexed by [`PlayerId`].
    pub positions: Vec<Position>,
    /// Tiles that currently carry a star.
    pub stars: BTreeSet<Position>,
    /// Accumulated score of each player, indexed by [`PlayerId`].
    pub scores: Vec<u32>,
}

impl GameState {
    /// Build the state of a freshly created game: given starting positions
    /// and stars, every score starts at zero.
    pub fn new(positions: Vec<Position>, stars: BTreeSet<Position>) -> Self {
        let scores = vec![0; positions.len()];
        Self {
            positions,
            stars,
            scores,
        }
    }

    /// Number of players in this game.
    pub fn player_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the position and score sequences are index-aligned.
    ///
    /// A `false` here is a construction bug in the caller, not a runtime
    /// condition the core recovers from.
    pub fn is_index_aligned(&self) -> bool {
        self.positions.len() == self.scores.len()
    }

    /// Iterate players as `(PlayerId, Position)` pairs.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, Position)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(idx, pos)| (PlayerId::new(idx), *pos))
    }
}

/// The result of advancing one game by one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// The state after the tick: final positions, unchanged stars,
    /// updated scores.
    pub state: GameState,
    /// Players whose final position landed on a star this tick.
    pub collected: Vec<PlayerId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        let positions = vec![Position::new(0, 0), Position::new(5, 5)];
        let stars = BTreeSet::from([Position::new(2, 2), Position::new(9, 9)]);
        GameState::new(positions, stars)
    }

    #[test]
    fn new_game_starts_scoreless() {
        let state = sample_state();
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.scores, vec![0, 0]);
        assert!(state.is_index_aligned());
    }

    #[test]
    fn players_are_indexed_in_order() {
        let state = sample_state();
        let ids: Vec<PlayerId> = state.players().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn misaligned_scores_are_detected() {
        let mut state = sample_state();
        state.scores.push(7);
        assert!(!state.is_index_aligned());
    }

    #[test]
    fn state_roundtrips_through_json() {
        let state = sample_state();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
