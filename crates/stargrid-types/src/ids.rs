//! Identifiers for games and players.
//!
//! A [`GameId`] is an opaque UUID v7 (time-ordered) minted when a game is
//! created. A [`PlayerId`] is a plain slot index in `[0, N)` -- player
//! identity in this game is positional, stable for the lifetime of the
//! game instance, and doubles as the index into the position and score
//! sequences.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a live game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Mint a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for GameId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for GameId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<GameId> for Uuid {
    fn from(id: GameId) -> Self {
        id.0
    }
}

/// A player's slot index within one game, in `[0, player_count)`.
///
/// The same index addresses the player's position, score, and strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl PlayerId {
    /// Create a player id from a slot index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The slot index, for addressing the index-aligned sequences.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

impl From<usize> for PlayerId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn game_ids_are_unique() {
        let a = GameId::new();
        let b = GameId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn game_id_roundtrip_serde() {
        let original = GameId::new();
        let json = serde_json::to_string(&original).unwrap();
        let restored: GameId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn game_id_display_matches_uuid() {
        let id = GameId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn player_id_serializes_as_bare_index() {
        let id = PlayerId::new(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        assert_eq!(id.to_string(), "player 3");
    }
}
