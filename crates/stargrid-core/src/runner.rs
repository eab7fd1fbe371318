//! Fault-isolated, deadline-bounded execution of player strategies.
//!
//! Strategies are third-party code: they may panic, spin forever, or take
//! longer than the tick allows. Each invocation therefore runs on its own
//! blocking worker thread behind an independent wall-clock deadline, and
//! every failure mode collapses to the same safe default -- the player
//! stays where it is:
//!
//! - a panic is contained by the task boundary and logged;
//! - a deadline overrun falls back immediately, without waiting; the join
//!   handle is dropped, so a late result is discarded and can never leak
//!   into a later tick (every tick clones its own inputs and assembles
//!   its own outputs);
//! - a missing registry slot behaves like a strategy that failed to load.
//!
//! All players run concurrently and their deadlines are independent: a
//! strategy sleeping through its budget costs the tick one timeout, not
//! one timeout per player after it. Results are assembled by player index
//! regardless of completion order.
//!
//! A strategy that never returns leaves one blocking-pool thread occupied
//! until it finishes; that is the cost of running untrusted code on a
//! shared pool, and the same leak a hung worker causes in a process pool.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future;
use stargrid_strategy::StrategyRegistry;
use stargrid_types::{PlayerId, Position};
use tokio::task;
use tokio::time;
use tracing::warn;

/// Run every player's strategy concurrently and collect raw proposals.
///
/// The result is index-aligned with `positions`. Proposals are returned
/// exactly as the strategies produced them -- legality is the validator's
/// concern, not the runner's.
pub async fn collect_proposals(
    registry: &StrategyRegistry,
    positions: &[Position],
    stars: &BTreeSet<Position>,
    timeout: Duration,
) -> Vec<Position> {
    let invocations = positions.iter().enumerate().map(|(idx, old)| {
        let player = PlayerId::new(idx);
        let old = *old;
        let strategy = registry.get(player).map(Arc::clone);
        let positions = positions.to_vec();
        let stars = stars.clone();

        async move {
            let Some(strategy) = strategy else {
                warn!(%player, "no strategy slot, player stays");
                return old;
            };
            let name = strategy.name();

            let handle =
                task::spawn_blocking(move || strategy.propose(player, &positions, &stars));

            match time::timeout(timeout, handle).await {
                Ok(Ok(proposal)) => proposal,
                Ok(Err(join_error)) => {
                    warn!(
                        %player,
                        strategy = name,
                        panicked = join_error.is_panic(),
                        "strategy crashed, player stays"
                    );
                    old
                }
                Err(_) => {
                    warn!(
                        %player,
                        strategy = name,
                        timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                        "strategy deadline exceeded, player stays"
                    );
                    old
                }
            }
        }
    });

    future::join_all(invocations).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::time::Instant;

    use stargrid_strategy::{HoldPosition, Strategy};

    use super::*;

    /// Always proposes a fixed cell, no matter the state.
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

    /// Blocks well past any reasonable deadline, then answers.
    struct Sleeper(Duration);

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
            std::thread::sleep(self.0);
            Position::new(0, 0)
        }
    }

    fn registry(slots: Vec<Arc<dyn Strategy>>) -> StrategyRegistry {
        StrategyRegistry::new(slots)
    }

    #[tokio::test]
    async fn proposals_are_assembled_by_player_index() {
        let reg = registry(vec![
            Arc::new(FixedMove(Position::new(1, 1))),
            Arc::new(FixedMove(Position::new(2, 2))),
            Arc::new(FixedMove(Position::new(3, 3))),
        ]);
        let positions = vec![Position::new(0, 0), Position::new(5, 5), Position::new(9, 9)];

        let proposals = collect_proposals(
            &reg,
            &positions,
            &BTreeSet::new(),
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(
            proposals,
            vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)]
        );
    }

    #[tokio::test]
    async fn panicking_strategy_stays_and_spares_the_rest() {
        let reg = registry(vec![
            Arc::new(Exploder),
            Arc::new(FixedMove(Position::new(7, 7))),
        ]);
        let positions = vec![Position::new(4, 4), Position::new(5, 5)];

        let proposals = collect_proposals(
            &reg,
            &positions,
            &BTreeSet::new(),
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(proposals, vec![Position::new(4, 4), Position::new(7, 7)]);
    }

    #[tokio::test]
    async fn slow_strategy_falls_back_to_stay() {
        let reg = registry(vec![Arc::new(Sleeper(Duration::from_millis(800)))]);
        let positions = vec![Position::new(3, 3)];

        let proposals = collect_proposals(
            &reg,
            &positions,
            &BTreeSet::new(),
            Duration::from_millis(50),
        )
        .await;

        assert_eq!(proposals, vec![Position::new(3, 3)]);
    }

    #[tokio::test]
    async fn deadlines_run_concurrently_not_sequentially() {
        // Three sleepers with a 100ms budget each: concurrent deadlines
        // finish in roughly one budget, nowhere near three.
        let reg = registry(vec![
            Arc::new(Sleeper(Duration::from_millis(1500))),
            Arc::new(Sleeper(Duration::from_millis(1500))),
            Arc::new(Sleeper(Duration::from_millis(1500))),
        ]);
        let positions = vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)];

        let started = Instant::now();
        let proposals = collect_proposals(
            &reg,
            &positions,
            &BTreeSet::new(),
            Duration::from_millis(100),
        )
        .await;
        let elapsed = started.elapsed();

        assert_eq!(proposals, positions);
        assert!(
            elapsed < Duration::from_millis(1000),
            "deadlines were serialized: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn garbage_proposals_pass_through_unjudged() {
        // The runner does not validate; an absurd cell reaches the
        // validator as-is.
        let reg = registry(vec![Arc::new(FixedMove(Position::new(-40, 999)))]);
        let positions = vec![Position::new(0, 0)];

        let proposals = collect_proposals(
            &reg,
            &positions,
            &BTreeSet::new(),
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(proposals, vec![Position::new(-40, 999)]);
    }

    #[tokio::test]
    async fn missing_slot_behaves_like_stay() {
        let reg = registry(vec![Arc::new(HoldPosition)]);
        // Two players, one slot: the second player has no strategy.
        let positions = vec![Position::new(1, 1), Position::new(2, 2)];

        let proposals = collect_proposals(
            &reg,
            &positions,
            &BTreeSet::new(),
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(proposals, positions);
    }
}
