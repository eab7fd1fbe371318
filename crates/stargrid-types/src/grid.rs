//! Grid geometry: positions, board dimensions, and the Manhattan metric.
//!
//! All movement rules in the simulation are expressed in terms of the
//! Manhattan distance between two cells. Coordinates are signed so that a
//! strategy returning an out-of-range cell (including a negative one) is
//! representable as data and rejected by move validation, rather than being
//! unconstructible.

use serde::{Deserialize, Serialize};

/// A cell on the game board, addressed as `(row, column)`.
///
/// Serializes as a 2-element array `[row, col]`, the format the HTTP
/// protocol uses for player and star coordinates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    /// Row index, `0` at the top.
    pub row: i32,
    /// Column index, `0` at the left.
    pub col: i32,
}

impl Position {
    /// Create a position from row and column indices.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The Manhattan distance `|dr| + |dc|` to another cell.
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// Whether this cell equals `other` or is one orthogonal step away.
    ///
    /// This is the movement-legality core: no diagonals, at most one step.
    pub const fn is_within_one_step(self, other: Self) -> bool {
        self.manhattan_distance(other) <= 1
    }

    /// The four orthogonal neighbor cells, without any bounds check.
    pub const fn orthogonal_neighbors(self) -> [Self; 4] {
        [
            Self::new(self.row.saturating_sub(1), self.col),
            Self::new(self.row.saturating_add(1), self.col),
            Self::new(self.row, self.col.saturating_sub(1)),
            Self::new(self.row, self.col.saturating_add(1)),
        ]
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Default board height in rows.
pub const DEFAULT_ROWS: i32 = 20;

/// Default board width in columns.
pub const DEFAULT_COLS: i32 = 30;

/// Board dimensions. Cells `(r, c)` with `0 <= r < rows` and
/// `0 <= c < cols` are in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub cols: i32,
}

impl GridDims {
    /// Create board dimensions.
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Whether the cell lies inside the board.
    pub const fn contains(self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Total number of cells on the board.
    pub fn cell_count(self) -> u64 {
        i64::from(self.rows)
            .saturating_mul(i64::from(self.cols))
            .unsigned_abs()
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
