//! Conflict resolution: from validated proposals to final positions.
//!
//! After validation, several players may still want the same tile, or may
//! want a tile somebody else is standing on. Two resolution policies exist
//! upstream and produce genuinely different outcomes for the same input,
//! so the deployment picks one via [`ConflictPolicy`] -- they are never
//! merged:
//!
//! - [`ConflictPolicy::DeterministicReset`]: every tile claimed by more
//!   than one player sends all of its moving claimants back to their old
//!   cells, and nobody may step onto a tile whose occupant stays put.
//!   Both rules repeat until stable. Fully deterministic.
//! - [`ConflictPolicy::RandomWinner`]: one uniform-random winner per
//!   contested tile (losers stay), and a move onto another player's old
//!   cell is allowed only if that occupant vacates it this tick -- so two
//!   players swapping cells both succeed, while walking into a stationary
//!   player is blocked.
//!
//! Both policies guarantee the same two invariants: every final position
//! is the player's own old cell or its validated proposal, and no two
//! players ever share a final position. The fixpoint loops are bounded by
//! the player count because each pass only ever turns movers into stayers;
//! the set of still-moving players shrinks monotonically.
//!
//! Inputs assume old positions are pairwise distinct (the previous tick's
//! no-collision guarantee, or initial placement).

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use stargrid_types::Position;

/// The policy used to resolve movement conflicts, fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Reset all conflicting movers, repeatedly, until stable.
    DeterministicReset,
    /// Pick one random winner per contested tile; allow swaps.
    #[default]
    RandomWinner,
}

/// Resolve all movement conflicts for one tick.
///
/// `old` and `validated` are index-aligned by player. The randomness
/// source is only consulted by [`ConflictPolicy::RandomWinner`], and only
/// for tiles claimed by two or more players (one independent uniform draw
/// per contested tile).
pub fn resolve<R: Rng + ?Sized>(
    policy: ConflictPolicy,
    old: &[Position],
    validated: &[Position],
    rng: &mut R,
) -> Vec<Position> {
    match policy {
        ConflictPolicy::DeterministicReset => resolve_deterministic_reset(old, validated),
        ConflictPolicy::RandomWinner => resolve_random_winner(old, validated, rng),
    }
}

/// Deterministic policy: conflicting movers are reset to their old cells,
/// and movers may not enter a cell whose occupant is staying; both rules
/// iterate to a fixpoint.
fn resolve_deterministic_reset(old: &[Position], validated: &[Position]) -> Vec<Position> {
    let mut finals: Vec<Position> = validated.to_vec();

    // A reset can create new conflicts (the mover now "claims" its own old
    // cell, which someone else may be stepping into), so the rules repeat
    // until nothing changes. Bounded: each pass converts at least one
    // mover into a stayer, and there are at most N movers.
    for _ in 0..=finals.len() {
        let mut changed = false;

        // Rule 1: any tile claimed by more than one player sends each
        // *moving* claimant home. A claimant already standing on the tile
        // stays by definition.
        let mut claims: BTreeMap<Position, u32> = BTreeMap::new();
        for target in &finals {
            claims
                .entry(*target)
                .and_modify(|n| *n = n.saturating_add(1))
                .or_insert(1);
        }
        for (target, o) in finals.iter_mut().zip(old) {
            if *target != *o && claims.get(target).copied().unwrap_or(0) > 1 {
                *target = *o;
                changed = true;
            }
        }

        // Rule 2: a mover may not enter a cell whose occupant is not
        // itself vacating this tick. Resets from rule 1 count as
        // stationary here.
        let stationary: Vec<Position> = old
            .iter()
            .zip(&finals)
            .filter(|(o, f)| o == f)
            .map(|(o, _)| *o)
            .collect();
        for (target, o) in finals.iter_mut().zip(old) {
            if *target != *o && stationary.contains(target) {
                *target = *o;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    finals
}

/// Randomized policy: one winner per contested tile, with the
/// occupancy/swap rule iterated to a fixpoint.
fn resolve_random_winner<R: Rng + ?Sized>(
    old: &[Position],
    validated: &[Position],
    rng: &mut R,
) -> Vec<Position> {
    let player_count = validated.len();

    // Group claimant indices by target tile. Staying players claim their
    // own cell like everyone else.
    let mut groups: BTreeMap<Position, Vec<usize>> = BTreeMap::new();
    for (idx, target) in validated.iter().enumerate() {
        groups.entry(*target).or_default().push(idx);
    }

    // Singleton groups win outright; contested tiles get one uniform
    // random winner and the rest of the group loses the tie-break.
    let mut won = vec![false; player_count];
    for claimants in groups.values() {
        let winner = if let [only] = claimants.as_slice() {
            Some(*only)
        } else {
            claimants.choose(rng).copied()
        };
        if let Some(flag) = winner.and_then(|idx| won.get_mut(idx)) {
            *flag = true;
        }
    }

    // A winner vacates its old cell only if it actually leaves it.
    let mut will_move: Vec<bool> = won
        .iter()
        .zip(validated.iter().zip(old))
        .map(|(w, (target, o))| *w && target != o)
        .collect();

    // Occupancy rule: entering another player's old cell is allowed only
    // if that occupant moves out this tick (swaps and vacancy chains
    // succeed). Iterated to a fixpoint so that a blocked winner counts as
    // stationary for everyone targeting *its* cell -- otherwise two
    // players could end the tick on the same tile.
    for _ in 0..=player_count {
        let vacating: BTreeMap<Position, bool> = old
            .iter()
            .zip(&will_move)
            .map(|(o, moving)| (*o, *moving))
            .collect();
        let mut changed = false;
        for (moving, target) in will_move.iter_mut().zip(validated) {
            if *moving && vacating.get(target) == Some(&false) {
                *moving = false;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    old.iter()
        .zip(validated.iter().zip(&will_move))
        .map(|(o, (target, moving))| if *moving { *target } else { *o })
        .collect()
}
