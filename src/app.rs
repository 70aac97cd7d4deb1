use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session;
use crate::shared::AppState;
use crate::websockets;

/// All HTTP routes of the game server
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/countries", get(session::list_countries))
        .route("/sessions", post(session::create_session))
        .route("/sessions/:id", get(session::get_session))
        .route("/sessions/:id/events", get(websockets::round_events))
        .route("/sessions/:id/rounds", post(session::start_round))
        .route("/sessions/:id/guesses", post(session::submit_guess))
        .route("/sessions/:id/hints", get(session::list_hints))
        .route("/sessions/:id/hints/:kind", post(session::purchase_hint))
        .layer(TraceLayer::new_for_http())
        // The browser front end may be served from another origin
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
