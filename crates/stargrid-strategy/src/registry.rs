//! The strategy registry: `PlayerId -> Strategy`, built once at startup.
//!
//! The registry is constructed from a list of configured strategy names,
//! one per player slot. Any name that does not resolve -- a typo, a
//! strategy that was removed -- gets the documented [`HoldPosition`]
//! fallback with a warning, so a bad configuration degrades one player to
//! standing still rather than taking the process down.

use std::sync::Arc;

use stargrid_types::{GridDims, PlayerId};
use tracing::warn;

use crate::Strategy;
use crate::builtin::{HoldPosition, NearestStar, RandomWalk};

/// Resolve a configured strategy name to an instance.
///
/// Known names: `hold`, `nearest_star`, `random_walk`. Returns `None` for
/// anything else; the registry maps that to the fallback.
pub fn build_strategy(name: &str, dims: GridDims) -> Option<Arc<dyn Strategy>> {
    match name {
        "hold" => Some(Arc::new(HoldPosition)),
        "nearest_star" => Some(Arc::new(NearestStar)),
        "random_walk" => Some(Arc::new(RandomWalk::new(dims))),
        _ => None,
    }
}

/// An immutable table assigning one strategy to each player slot.
pub struct StrategyRegistry {
    slots: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Build a registry directly from strategy instances.
    pub const fn new(slots: Vec<Arc<dyn Strategy>>) -> Self {
        Self { slots }
    }

    /// Build a registry of `count` slots from configured names.
    ///
    /// Slot `i` gets the strategy named by `names[i]`. A missing entry
    /// (fewer names than players) or an unknown name resolves to
    /// [`HoldPosition`].
    pub fn from_names(names: &[String], count: usize, dims: GridDims) -> Self {
        let slots = (0..count)
            .map(|idx| {
                names.get(idx).map_or_else(
                    || {
                        warn!(slot = idx, "no strategy configured, using hold fallback");
                        Arc::new(HoldPosition) as Arc<dyn Strategy>
                    },
                    |name| {
                        build_strategy(name, dims).unwrap_or_else(|| {
                            warn!(
                                slot = idx,
                                strategy = name.as_str(),
                                "unknown strategy name, using hold fallback"
                            );
                            Arc::new(HoldPosition)
                        })
                    },
                )
            })
            .collect();
        Self { slots }
    }

    /// The strategy assigned to `player`, if the slot exists.
    pub fn get(&self, player: PlayerId) -> Option<&Arc<dyn Strategy>> {
        self.slots.get(player.index())
    }

    /// Number of player slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the registry has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate the slots in player order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> {
        self.slots.iter()
    }
}

impl core::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&'static str> = self.slots.iter().map(|s| s.name()).collect();
        f.debug_struct("StrategyRegistry").field("slots", &names).finish()
    }
}
