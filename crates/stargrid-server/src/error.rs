//! Error types for the game API layer.
//!
//! [`ApiError`] unifies all request-level failure modes into a single enum
//! that converts into an Axum HTTP response with a JSON body. Core-level
//! tick errors map to 500 because the handlers construct their inputs;
//! reaching one is a server bug, not a client mistake.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stargrid_types::GameId;

/// Errors that can occur in the game API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested game id is not registered.
    #[error("unknown game id: {0}")]
    UnknownGame(GameId),

    /// A game id in the request path is not a valid UUID.
    #[error("invalid game id: {0}")]
    InvalidGameId(String),

    /// The request body is structurally valid but semantically wrong
    /// (bad player count, duplicate positions, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The simulation core rejected its inputs.
    #[error("tick failed: {0}")]
    Tick(#[from] stargrid_core::TickError),

    /// Board generation could not satisfy the placement constraints.
    #[error("board generation failed: {0}")]
    Board(#[from] stargrid_core::BoardError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownGame(_) => StatusCode::NOT_FOUND,
            Self::InvalidGameId(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Tick(_) | Self::Board(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
