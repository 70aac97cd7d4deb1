use axum::{
    extract::{Path, State},
    Json,
};
use std::str::FromStr;
use tracing::{info, instrument};

use super::types::{GuessRequest, SessionResponse};
use crate::geo::CountryMarker;
use crate::hints::{HintKind, HintReveal, HintStatus};
use crate::round::GuessOutcome;
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new session
///
/// POST /sessions
/// Starts the first round right away
#[instrument(name = "create_session", skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let (session_id, round) = state.game_service.create_session().await?;

    info!(session_id = %session_id, round_id = %round.state.round_id, "Session started");

    Ok(Json(SessionResponse { session_id, round }))
}

/// GET /sessions/:id
#[instrument(name = "get_session", skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let round = state.game_service.snapshot(&session_id).await?;
    Ok(Json(SessionResponse { session_id, round }))
}

/// HTTP handler for moving on to the next player
///
/// POST /sessions/:id/rounds
/// Abandons the current round, whatever its phase
#[instrument(name = "start_round", skip(state))]
pub async fn start_round(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let round = state.game_service.start_round(&session_id).await?;
    Ok(Json(SessionResponse { session_id, round }))
}

/// POST /sessions/:id/guesses
#[instrument(name = "submit_guess", skip(state))]
pub async fn submit_guess(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessOutcome>, AppError> {
    let outcome = state
        .game_service
        .submit_guess(&session_id, &request.country)
        .await?;
    Ok(Json(outcome))
}

/// HTTP handler for buying a hint
///
/// POST /sessions/:id/hints/:kind
/// `kind` is a hint name such as `POSITION` or `former_teams`
#[instrument(name = "purchase_hint", skip(state))]
pub async fn purchase_hint(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(String, String)>,
) -> Result<Json<HintReveal>, AppError> {
    let kind = HintKind::from_str(&kind)
        .map_err(|_| AppError::BadRequest(format!("Unknown hint: {}", kind)))?;

    let reveal = state.game_service.purchase_hint(&session_id, kind).await?;
    Ok(Json(reveal))
}

/// GET /sessions/:id/hints
#[instrument(name = "list_hints", skip(state))]
pub async fn list_hints(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HintStatus>>, AppError> {
    let statuses = state.game_service.hint_statuses(&session_id).await?;
    Ok(Json(statuses))
}

/// Markers for the world map
///
/// GET /countries
pub async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountryMarker>> {
    Json(state.countries.markers())
}
