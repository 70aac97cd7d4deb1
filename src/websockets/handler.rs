use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::Response,
};
use tracing::{info, instrument};

use super::socket::forward_events;
use crate::shared::{AppError, AppState};

/// HTTP handler for the round event stream of a session
///
/// GET /sessions/:id/events
/// Upgrades to a websocket that receives every `RoundEvent` as JSON text
#[instrument(name = "round_events", skip(ws, state))]
pub async fn round_events(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    // Subscribe before upgrading so nothing emitted during the handshake is lost
    let events = state.game_service.subscribe(&session_id).await?;

    info!(session_id = %session_id, "Round event stream requested");

    Ok(ws.on_upgrade(move |mut socket| async move {
        forward_events(&session_id, &mut socket, events).await;
    }))
}
