//! Player strategies: the decision seam of the simulation.
//!
//! Each tick, every player's [`Strategy`] is shown the shared game state
//! (all player positions plus the star tiles) and proposes a destination
//! cell. Strategies are **untrusted**: they may panic, block past their
//! deadline, or return a cell that is out of bounds or not adjacent. None
//! of that is this crate's concern -- the simulation core runs strategies
//! inside a fault boundary and downgrades every misbehavior to "stay".
//!
//! # Modules
//!
//! - [`builtin`] -- the strategies that ship with the game
//! - [`registry`] -- the `PlayerId -> Strategy` table with load fallback

use std::collections::BTreeSet;

use stargrid_types::{PlayerId, Position};

pub mod builtin;
pub mod registry;

pub use builtin::{HoldPosition, NearestStar, RandomWalk};
pub use registry::{StrategyRegistry, build_strategy};

/// A per-player decision function.
///
/// Implementations must be `Send + Sync` because the core fans proposals
/// out across worker threads, one isolated invocation per player per tick.
/// From the core's perspective a strategy is stateless: it receives
/// read-only views and returns a single [`Position`]. Whatever internal
/// state an implementation keeps is its own concern and is never trusted.
pub trait Strategy: Send + Sync {
    /// Stable name of the strategy, used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Propose a destination for `player` given the current tick's view.
    ///
    /// `positions` is indexed by [`PlayerId`]; `positions[player]` is the
    /// caller's own cell. The returned cell does not have to be legal --
    /// the core validates it and silently substitutes "stay" for any
    /// illegal proposal.
    fn propose(
        &self,
        player: PlayerId,
        positions: &[Position],
        stars: &BTreeSet<Position>,
    ) -> Position;
}
