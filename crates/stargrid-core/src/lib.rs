//! Simulation core for stargrid: turning N untrusted player strategies
//! into one conflict-free state transition per tick.
//!
//! The pipeline, in data-flow order:
//!
//! 1. [`runner`] fans the strategies out concurrently with per-player
//!    wall-clock deadlines and a panic boundary; every failure collapses
//!    to "the player stays".
//! 2. [`validate`] downgrades illegal proposals (diagonal, jump, out of
//!    bounds) to "stay".
//! 3. [`conflict`] settles same-target and occupancy disputes under the
//!    configured [`ConflictPolicy`].
//! 4. [`score`] pays out a point per star landed on.
//!
//! [`tick::run_step`] orchestrates the phases; [`board`] generates the
//! starting state; [`config`] holds the YAML-backed knobs. The core is
//! stateless between ticks -- each call is self-contained given its
//! [`GameState`](stargrid_types::GameState) input.

pub mod board;
pub mod config;
pub mod conflict;
pub mod runner;
pub mod score;
pub mod tick;
pub mod validate;

pub use board::{BoardError, generate_board, generate_state};
pub use config::{ConfigError, GameConfig, ServerConfig};
pub use conflict::{ConflictPolicy, resolve};
pub use tick::{TickError, run_step};
