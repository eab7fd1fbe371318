//! REST API endpoint handlers for the game server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/games` | Create a game (board + registry entry) |
//! | `GET` | `/api/games` | List registered games |
//! | `GET` | `/api/games/:id` | Single game summary |
//! | `POST` | `/api/games/:id/step` | Advance a game by one tick |
//!
//! The step endpoint is the transport face of the simulation core: the
//! caller supplies the current positions and the surviving star set, the
//! server supplies the scores it is authoritative for, and one tick runs
//! under the game's own lock.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use serde::{Deserialize, Serialize};
use stargrid_core::run_step;
use stargrid_types::{GameId, GameState, PlayerId, Position};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Smallest player count a game can be created with.
const MIN_PLAYERS: usize = 2;

/// Largest player count a game can be created with.
const MAX_PLAYERS: usize = 16;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/games`. An empty body uses the configured count.
#[derive(Debug, Default, Deserialize)]
pub struct CreateGameRequest {
    /// Requested player count; defaults to the deployment configuration.
    pub players: Option<usize>,
}

/// Response of `POST /api/games`.
#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    /// The new game's id.
    pub game_id: GameId,
    /// Starting player positions, indexed by player.
    pub players: Vec<Position>,
    /// Starting star tiles.
    pub stars: Vec<Position>,
    /// Starting scores (all zero).
    pub scores: Vec<u32>,
}

/// Body of `POST /api/games/:id/step`.
#[derive(Debug, Deserialize)]
pub struct StepRequest {
    /// Current player positions, indexed by player.
    pub players: Vec<Position>,
    /// Star tiles still on the board (collected ones already pruned).
    pub stars: Vec<Position>,
}

/// Response of `POST /api/games/:id/step`.
#[derive(Debug, Serialize)]
pub struct StepResponse {
    /// Final position per player after conflict resolution.
    pub coord: Vec<Position>,
    /// Updated scores.
    pub scores: Vec<u32>,
    /// Players whose final position landed on a star this tick.
    pub collected: Vec<PlayerId>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let game_count = state.game_count().await;
    let policy = format!("{:?}", state.config.conflict_policy);
    let rows = state.config.grid.rows;
    let cols = state.config.grid.cols;
    let players = state.config.players;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Stargrid</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 110px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Stargrid</h1>
    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Games</div>
            <div class="value">{game_count}</div>
        </div>
        <div class="metric">
            <div class="label">Board</div>
            <div class="value">{rows}&times;{cols}</div>
        </div>
        <div class="metric">
            <div class="label">Players</div>
            <div class="value">{players}</div>
        </div>
        <div class="metric">
            <div class="label">Policy</div>
            <div class="value">{policy}</div>
        </div>
    </div>

    <h2>API</h2>
    <ul>
        <li>POST <a href="/api/games">/api/games</a> -- create a game</li>
        <li>GET <a href="/api/games">/api/games</a> -- list games</li>
        <li>GET /api/games/:id -- game summary</li>
        <li>POST /api/games/:id/step -- advance one tick</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// POST /api/games -- create a game
// ---------------------------------------------------------------------------

/// Create a new game and return its id and initial board.
///
/// The body is optional: an empty body (or empty object) uses the
/// configured player count.
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: CreateGameRequest = if body.is_empty() {
        CreateGameRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidRequest(format!("bad request body: {e}")))?
    };
    let players = request.players.unwrap_or(state.config.players);

    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(ApiError::InvalidRequest(format!(
            "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {players}"
        )));
    }

    let (game_id, initial) = state.create_game(players).await?;

    Ok(Json(CreateGameResponse {
        game_id,
        players: initial.positions,
        stars: initial.stars.into_iter().collect(),
        scores: initial.scores,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/games -- list games
// ---------------------------------------------------------------------------

/// List all registered games with their progress counters.
pub async fn list_games(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let games = state.games.read().await;
    let mut summaries = Vec::with_capacity(games.len());
    for (id, entry) in games.iter() {
        let progress = entry.progress.lock().await;
        summaries.push(serde_json::json!({
            "id": id,
            "players": entry.player_count,
            "ticks": progress.ticks,
            "created_at": entry.created_at.to_rfc3339(),
        }));
    }

    Json(serde_json::json!({
        "count": summaries.len(),
        "games": summaries,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/games/:id -- single game summary
// ---------------------------------------------------------------------------

/// Return the registry's view of one game: players, scores, tick count.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_game_id(&id_str)?;
    let entry = state.get_game(id).await.ok_or(ApiError::UnknownGame(id))?;
    let progress = entry.progress.lock().await;

    Ok(Json(serde_json::json!({
        "id": id,
        "players": entry.player_count,
        "scores": progress.scores,
        "ticks": progress.ticks,
        "created_at": entry.created_at.to_rfc3339(),
    })))
}

// ---------------------------------------------------------------------------
// POST /api/games/:id/step -- advance one tick
// ---------------------------------------------------------------------------

/// Run one tick for the addressed game.
///
/// The caller owns positions and the star set; the registry owns scores.
/// The per-game lock guarantees at most one in-flight tick per game id.
pub async fn step_game(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(request): Json<StepRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_game_id(&id_str)?;
    let entry = state.get_game(id).await.ok_or(ApiError::UnknownGame(id))?;

    if request.players.len() != entry.player_count {
        return Err(ApiError::InvalidRequest(format!(
            "game has {} players, request supplied {}",
            entry.player_count,
            request.players.len()
        )));
    }
    let distinct: BTreeSet<Position> = request.players.iter().copied().collect();
    if distinct.len() != request.players.len() {
        return Err(ApiError::InvalidRequest(String::from(
            "player positions must be distinct",
        )));
    }

    let mut progress = entry.progress.lock().await;

    let game_state = GameState {
        positions: request.players,
        stars: request.stars.into_iter().collect(),
        scores: progress.scores.clone(),
    };

    let outcome = run_step(&game_state, &entry.registry, &state.config).await?;

    progress.scores.clone_from(&outcome.state.scores);
    progress.ticks = progress.ticks.saturating_add(1);

    Ok(Json(StepResponse {
        coord: outcome.state.positions,
        scores: outcome.state.scores,
        collected: outcome.collected,
    }))
}

/// Parse a game id from its path representation.
fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    Uuid::parse_str(raw)
        .map(GameId::from)
        .map_err(|_| ApiError::InvalidGameId(raw.to_owned()))
}
