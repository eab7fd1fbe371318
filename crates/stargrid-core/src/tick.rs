//! The step coordinator: one complete tick of a game.
//!
//! A tick runs four phases over an input [`GameState`]:
//!
//! 1. **Propose** -- every player's strategy runs concurrently inside the
//!    fault/deadline boundary ([`crate::runner`]).
//! 2. **Validate** -- each raw proposal is checked for legality and
//!    silently downgraded to "stay" if illegal ([`crate::validate`]).
//! 3. **Resolve** -- same-target and occupancy conflicts are settled by
//!    the configured policy ([`crate::conflict`]).
//! 4. **Score** -- players standing on a star earn a point
//!    ([`crate::score`]).
//!
//! No strategy failure mode escapes a tick: every internal fault degrades
//! to the affected player staying put, so `run_step` always produces a
//! valid successor state for a well-formed input. The only errors are
//! construction bugs -- a registry sized differently than the player
//! sequence, or a state whose sequences disagree -- which are rejected up
//! front before anything runs.
//!
//! The coordinator owns no state between ticks. Callers are responsible
//! for not running two ticks of the *same* game concurrently; ticks of
//! different games are fully independent.

use stargrid_strategy::StrategyRegistry;
use stargrid_types::{GameState, StepOutcome};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::{conflict, runner, score, validate};

/// Errors that can occur when starting a tick.
///
/// These indicate a mis-constructed input, never a runtime condition:
/// nothing a strategy does can produce them.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The registry does not have one strategy per player.
    #[error("registry has {strategies} strategies for {players} players")]
    PlayerCountMismatch {
        /// Number of strategy slots in the registry.
        strategies: usize,
        /// Number of players in the game state.
        players: usize,
    },

    /// The state's position and score sequences disagree in length.
    #[error("state is not index-aligned: {positions} positions, {scores} scores")]
    StateMisaligned {
        /// Length of the position sequence.
        positions: usize,
        /// Length of the score sequence.
        scores: usize,
    },
}

/// Execute one complete tick and return the successor state.
///
/// The returned state carries the post-conflict final positions, the
/// *unchanged* star set (pruning collected stars is the caller's
/// lifecycle decision), and the updated scores. [`StepOutcome::collected`]
/// lists the players who landed on a star.
///
/// # Errors
///
/// Returns [`TickError`] only for mis-constructed inputs; see the
/// variants.
pub async fn run_step(
    state: &GameState,
    registry: &StrategyRegistry,
    config: &GameConfig,
) -> Result<StepOutcome, TickError> {
    if registry.len() != state.player_count() {
        return Err(TickError::PlayerCountMismatch {
            strategies: registry.len(),
            players: state.player_count(),
        });
    }
    if !state.is_index_aligned() {
        return Err(TickError::StateMisaligned {
            positions: state.positions.len(),
            scores: state.scores.len(),
        });
    }

    // --- Phase 1: Propose (concurrent, fault-isolated) ---
    let proposed = runner::collect_proposals(
        registry,
        &state.positions,
        &state.stars,
        config.strategy_timeout(),
    )
    .await;
    debug!(players = state.player_count(), "proposals collected");

    // --- Phase 2: Validate ---
    let validated = validate::validate_all(config.grid, &state.positions, &proposed);
    let downgraded = proposed
        .iter()
        .zip(&validated)
        .filter(|(p, v)| p != v)
        .count();
    if downgraded > 0 {
        debug!(downgraded, "illegal proposals downgraded to stay");
    }

    // --- Phase 3: Resolve conflicts ---
    let finals = conflict::resolve(
        config.conflict_policy,
        &state.positions,
        &validated,
        &mut rand::rng(),
    );

    // --- Phase 4: Score ---
    let scores = score::award_scores(&state.scores, &finals, &state.stars);
    let collected = score::collectors(&finals, &state.stars);

    info!(
        players = state.player_count(),
        policy = ?config.conflict_policy,
        stars_collected = collected.len(),
        "tick resolved"
    );

    Ok(StepOutcome {
        state: GameState {
            positions: finals,
            stars: state.stars.clone(),
            scores,
        },
        collected,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::time::Duration;

    use stargrid_strategy::{HoldPosition, NearestStar, Strategy, StrategyRegistry};
    use stargrid_types::{PlayerId, Position};

    use super::*;

    /// Always proposes a fixed cell.
    struct FixedMove(Position);

    impl Strategy for FixedMove {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn propose(
            &self,
            _player: PlayerId,
            _positions: &[Position],
            _stars: &BTreeSet<Position>,
        ) -> Position {
            self.0
        }
    }

    /// Panics on every invocation.
    struct Exploder;

    impl Strategy for Exploder {
        fn name(&self) -> &'static str {
            "exploder"
        }

        fn propose(
            &self,
            _player: PlayerId,
            _positions: &[Position],
            _stars: &BTreeSet<Position>,
        ) -> Position {
            panic!("strategy bug")
        }
    }

    /// Sleeps past the deadline before answering.
    struct Sleeper;

    impl Strategy for Sleeper {
        fn name(&self) -> &'static str {
            "sleeper"
        }

        fn propose(
            &self,
            _player: PlayerId,
            _positions: &[Position],
            _stars: &BTreeSet<Position>,
        ) -> Position {
            std::thread::sleep(Duration::from_millis(800));
            Position::new(0, 1)
        }
    }

    fn fast_config() -> GameConfig {
        GameConfig {
            strategy_timeout_ms: 100,
            ..GameConfig::default()
        }
    }

    fn state_of(positions: Vec<Position>, stars: BTreeSet<Position>) -> GameState {
        GameState::new(positions, stars)
    }

    #[tokio::test]
    async fn all_hold_leaves_state_unchanged_except_logs() {
        let state = state_of(
            vec![Position::new(1, 1), Position::new(8, 8)],
            BTreeSet::from([Position::new(15, 15)]),
        );
        let registry = StrategyRegistry::new(vec![
            Arc::new(HoldPosition) as Arc<dyn Strategy>,
            Arc::new(HoldPosition),
        ]);

        let outcome = run_step(&state, &registry, &fast_config()).await.unwrap();
        assert_eq!(outcome.state, state);
        assert!(outcome.collected.is_empty());
    }

    #[tokio::test]
    async fn registry_size_mismatch_is_rejected() {
        let state = state_of(
            vec![Position::new(1, 1), Position::new(8, 8)],
            BTreeSet::new(),
        );
        let registry = StrategyRegistry::new(vec![Arc::new(HoldPosition) as Arc<dyn Strategy>]);

        let result = run_step(&state, &registry, &fast_config()).await;
        assert!(matches!(
            result,
            Err(TickError::PlayerCountMismatch {
                strategies: 1,
                players: 2
            })
        ));
    }

    #[tokio::test]
    async fn misaligned_state_is_rejected() {
        let mut state = state_of(vec![Position::new(1, 1)], BTreeSet::new());
        state.scores.push(9);
        let registry = StrategyRegistry::new(vec![Arc::new(HoldPosition) as Arc<dyn Strategy>]);

        let result = run_step(&state, &registry, &fast_config()).await;
        assert!(matches!(result, Err(TickError::StateMisaligned { .. })));
    }

    #[tokio::test]
    async fn faulty_strategies_stay_while_others_play_on() {
        let state = state_of(
            vec![Position::new(2, 2), Position::new(10, 10), Position::new(17, 25)],
            BTreeSet::new(),
        );
        let registry = StrategyRegistry::new(vec![
            Arc::new(Exploder) as Arc<dyn Strategy>,
            Arc::new(Sleeper),
            Arc::new(FixedMove(Position::new(17, 26))),
        ]);

        let outcome = run_step(&state, &registry, &fast_config()).await.unwrap();
        assert_eq!(
            outcome.state.positions,
            vec![Position::new(2, 2), Position::new(10, 10), Position::new(17, 26)]
        );
    }

    #[tokio::test]
    async fn landing_on_a_star_scores_and_is_reported() {
        let star = Position::new(3, 4);
        let state = state_of(
            vec![Position::new(3, 3), Position::new(12, 12)],
            BTreeSet::from([star]),
        );
        let registry = StrategyRegistry::new(vec![
            Arc::new(FixedMove(star)) as Arc<dyn Strategy>,
            Arc::new(HoldPosition),
        ]);

        let outcome = run_step(&state, &registry, &fast_config()).await.unwrap();
        assert_eq!(outcome.state.scores, vec![1, 0]);
        assert_eq!(outcome.collected, vec![PlayerId::new(0)]);
        // The core never prunes stars.
        assert_eq!(outcome.state.stars, state.stars);
    }

    #[tokio::test]
    async fn repeated_ticks_keep_players_distinct_and_legal() {
        let config = GameConfig {
            strategy_timeout_ms: 200,
            ..GameConfig::default()
        };
        // Everyone hunts the same single star: maximal contention.
        let star = Position::new(10, 15);
        let mut state = state_of(
            vec![
                Position::new(8, 15),
                Position::new(12, 15),
                Position::new(10, 13),
                Position::new(10, 17),
            ],
            BTreeSet::from([star]),
        );
        let registry = StrategyRegistry::new(vec![
            Arc::new(NearestStar) as Arc<dyn Strategy>,
            Arc::new(NearestStar),
            Arc::new(NearestStar),
            Arc::new(NearestStar),
        ]);

        for _ in 0..12 {
            let outcome = run_step(&state, &registry, &config).await.unwrap();
            let next = outcome.state;

            let unique: BTreeSet<Position> = next.positions.iter().copied().collect();
            assert_eq!(unique.len(), next.positions.len(), "players collided");

            for (old, new) in state.positions.iter().zip(&next.positions) {
                assert!(old.is_within_one_step(*new));
                assert!(config.grid.contains(*new));
            }
            for (before, after) in state.scores.iter().zip(&next.scores) {
                assert!(after >= before);
            }
            state = next;
        }
    }
}
