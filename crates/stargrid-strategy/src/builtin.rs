//! Built-in player strategies.
//!
//! Three well-behaved baselines ship with the game:
//!
//! - [`HoldPosition`] never moves. It is also the documented fallback the
//!   registry substitutes for any strategy that fails to load.
//! - [`NearestStar`] takes one orthogonal step toward the closest star by
//!   Manhattan distance.
//! - [`RandomWalk`] picks a uniformly random in-bounds neighbor, or stays.
//!
//! A strategy whose player index is somehow absent from the positions
//! sequence returns the board origin; the core's validator turns any such
//! nonsense into "stay" anyway.

use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use stargrid_types::{GridDims, PlayerId, Position};

use crate::Strategy;

/// Fallback cell for a player index that is out of range.
const ORIGIN: Position = Position::new(0, 0);

/// Never moves: always proposes the player's current cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPosition;

impl Strategy for HoldPosition {
    fn name(&self) -> &'static str {
        "hold"
    }

    fn propose(
        &self,
        player: PlayerId,
        positions: &[Position],
        _stars: &BTreeSet<Position>,
    ) -> Position {
        positions.get(player.index()).copied().unwrap_or(ORIGIN)
    }
}

/// Greedy collector: one orthogonal step toward the closest star.
///
/// Distance ties between stars break toward the smaller cell in `(row,
/// col)` order, so the choice is deterministic. With no stars on the
/// board, the player stays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestStar;

impl Strategy for NearestStar {
    fn name(&self) -> &'static str {
        "nearest_star"
    }

    fn propose(
        &self,
        player: PlayerId,
        positions: &[Position],
        stars: &BTreeSet<Position>,
    ) -> Position {
        let Some(own) = positions.get(player.index()).copied() else {
            return ORIGIN;
        };
        let Some(target) = stars
            .iter()
            .copied()
            .min_by_key(|star| (own.manhattan_distance(*star), *star))
        else {
            return own;
        };
        step_toward(own, target)
    }
}

/// One orthogonal step from `from` toward `to`, along the axis with the
/// larger remaining distance (rows win ties). Returns `from` when already
/// there.
fn step_toward(from: Position, to: Position) -> Position {
    let dr = to.row.saturating_sub(from.row);
    let dc = to.col.saturating_sub(from.col);
    if dr.abs() >= dc.abs() && dr != 0 {
        Position::new(from.row.saturating_add(dr.signum()), from.col)
    } else if dc != 0 {
        Position::new(from.row, from.col.saturating_add(dc.signum()))
    } else {
        from
    }
}

/// Drunkard's walk: a uniformly random in-bounds neighbor, or stay.
///
/// Needs the board dimensions so it never proposes an out-of-bounds cell
/// (such a proposal would only be downgraded to "stay" by validation,
/// wasting the tick).
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk {
    dims: GridDims,
}

impl RandomWalk {
    /// Create a random walker for a board of the given dimensions.
    pub const fn new(dims: GridDims) -> Self {
        Self { dims }
    }
}

impl Strategy for RandomWalk {
    fn name(&self) -> &'static str {
        "random_walk"
    }

    fn propose(
        &self,
        player: PlayerId,
        positions: &[Position],
        _stars: &BTreeSet<Position>,
    ) -> Position {
        let Some(own) = positions.get(player.index()).copied() else {
            return ORIGIN;
        };
        let mut options: Vec<Position> = own
            .orthogonal_neighbors()
            .iter()
            .copied()
            .filter(|cell| self.dims.contains(*cell))
            .collect();
        options.push(own);
        options.choose(&mut rand::rng()).copied().unwrap_or(own)
    }
}
