//! Game API server for stargrid.
//!
//! Exposes the simulation core over HTTP and owns the game registry:
//! creating a game generates a board and registers its scores and
//! strategy lineup; stepping a game runs one tick of the core under that
//! game's own lock. The simulation core itself stays stateless -- every
//! tick is a pure function of the state assembled here.
//!
//! # Modules
//!
//! - [`state`] -- the game registry ([`state::AppState`])
//! - [`error`] -- request-level errors with HTTP mappings
//! - [`handlers`] -- REST endpoint handlers
//! - [`router`] -- route table and middleware
//! - [`server`] -- bind/serve lifecycle

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServeError, start_server};
pub use state::AppState;
