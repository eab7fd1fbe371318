//! Score bookkeeping: landing on a star earns one point.
//!
//! Pure functions of their inputs, no error conditions. Removing or
//! regenerating stars is the caller's concern -- the core only computes
//! score deltas against the star set it was handed for this tick, so a
//! star left in place would keep paying out until the caller prunes it.

use std::collections::BTreeSet;

use stargrid_types::{PlayerId, Position};

/// New score sequence: +1 for every player whose final cell is a star.
///
/// Scores only ever grow; a player not on a star keeps its score exactly.
pub fn award_scores(
    scores: &[u32],
    finals: &[Position],
    stars: &BTreeSet<Position>,
) -> Vec<u32> {
    scores
        .iter()
        .zip(finals)
        .map(|(score, pos)| {
            if stars.contains(pos) {
                score.saturating_add(1)
            } else {
                *score
            }
        })
        .collect()
}

/// The players who landed on a star this tick, in id order.
pub fn collectors(finals: &[Position], stars: &BTreeSet<Position>) -> Vec<PlayerId> {
    finals
        .iter()
        .enumerate()
        .filter(|(_, pos)| stars.contains(pos))
        .map(|(idx, _)| PlayerId::new(idx))
        .collect()
}
