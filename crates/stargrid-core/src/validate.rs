//! Move legality: one orthogonal step or stay, inside the board.
//!
//! Validation never errors. An illegal proposal -- a diagonal, a jump, or
//! an out-of-bounds cell -- is silently replaced by the player's current
//! position, so from the rest of the pipeline's point of view the player
//! simply chose to stay. This is the same downgrade the runner applies to
//! crashes and timeouts: a misbehaving player is indistinguishable from a
//! stationary one.

use stargrid_types::{GridDims, Position};

/// Check one proposal against the movement rules.
///
/// Legal iff `proposed` is within one orthogonal step of `old`
/// (Manhattan distance <= 1) **and** inside the board. Returns the
/// proposal when legal, `old` otherwise.
pub const fn validate_move(dims: GridDims, old: Position, proposed: Position) -> Position {
    if old.is_within_one_step(proposed) && dims.contains(proposed) {
        proposed
    } else {
        old
    }
}

/// Validate every player's proposal, index-aligned with `old`.
pub fn validate_all(dims: GridDims, old: &[Position], proposed: &[Position]) -> Vec<Position> {
    old.iter()
        .zip(proposed)
        .map(|(o, p)| validate_move(dims, *o, *p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: GridDims = GridDims::new(20, 30);

    #[test]
    fn orthogonal_step_is_legal() {
        let old = Position::new(4, 4);
        for proposed in old.orthogonal_neighbors() {
            assert_eq!(validate_move(DIMS, old, proposed), proposed);
        }
    }

    #[test]
    fn staying_is_legal() {
        let old = Position::new(4, 4);
        assert_eq!(validate_move(DIMS, old, old), old);
    }

    #[test]
    fn diagonal_is_downgraded_to_stay() {
        let old = Position::new(4, 4);
        assert_eq!(validate_move(DIMS, old, Position::new(5, 5)), old);
    }

    #[test]
    fn jump_is_downgraded_to_stay() {
        let old = Position::new(4, 4);
        assert_eq!(validate_move(DIMS, old, Position::new(4, 6)), old);
        assert_eq!(validate_move(DIMS, old, Position::new(17, 25)), old);
    }

    #[test]
    fn leaving_the_board_is_downgraded_to_stay() {
        let top_left = Position::new(0, 0);
        assert_eq!(validate_move(DIMS, top_left, Position::new(-1, 0)), top_left);
        assert_eq!(validate_move(DIMS, top_left, Position::new(0, -1)), top_left);

        let bottom_right = Position::new(19, 29);
        assert_eq!(
            validate_move(DIMS, bottom_right, Position::new(20, 29)),
            bottom_right
        );
        assert_eq!(
            validate_move(DIMS, bottom_right, Position::new(19, 30)),
            bottom_right
        );
    }

    #[test]
    fn garbage_coordinates_are_downgraded_to_stay() {
        let old = Position::new(10, 10);
        assert_eq!(validate_move(DIMS, old, Position::new(999, -999)), old);
    }

    #[test]
    fn validate_all_is_index_aligned() {
        let old = vec![Position::new(0, 0), Position::new(5, 5)];
        let proposed = vec![Position::new(0, 1), Position::new(9, 9)];
        let validated = validate_all(DIMS, &old, &proposed);
        assert_eq!(validated, vec![Position::new(0, 1), Position::new(5, 5)]);
    }
}
