use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::geo::StaticCountryTable;
use crate::round::RoundError;
use crate::session::GameService;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub countries: Arc<StaticCountryTable>,
}

impl AppState {
    pub fn new(game_service: Arc<GameService>, countries: Arc<StaticCountryTable>) -> Self {
        Self {
            game_service,
            countries,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Round was replaced while the request was in flight")]
    StaleRound,

    #[error("Player unavailable: {0}")]
    PlayerUnavailable(String),

    #[error("Internal server error")]
    Internal,
}

impl From<RoundError> for AppError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::NoCountrySelected => AppError::BadRequest(err.to_string()),
            RoundError::CountryNotFound(_) => AppError::NotFound(err.to_string()),
            RoundError::HintRejected(rejection) => AppError::Conflict(rejection.to_string()),
            RoundError::CountryTable(msg) => {
                error!(error = %msg, "Country table lookup failed");
                AppError::Internal
            }
            RoundError::NotReady | RoundError::AlreadyStarted | RoundError::RoundOver => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::StaleRound => (StatusCode::CONFLICT, AppError::StaleRound.to_string()),
            AppError::PlayerUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
