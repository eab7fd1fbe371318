//! Axum router construction for the game API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so a browser front-end on another origin can drive games.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the game server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `POST /api/games` -- create a game
/// - `GET /api/games` -- list games
/// - `GET /api/games/{id}` -- single game summary
/// - `POST /api/games/{id}/step` -- advance a game by one tick
///
/// CORS allows any origin for development; restrict it in production.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/games",
            post(handlers::create_game).get(handlers::list_games),
        )
        .route("/api/games/{id}", get(handlers::get_game))
        .route("/api/games/{id}/step", post(handlers::step_game))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
