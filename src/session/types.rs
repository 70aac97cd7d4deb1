use serde::{Deserialize, Serialize};

use crate::round::RoundSnapshot;

/// Response for session creation and session lookups
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub round: RoundSnapshot,
}

/// Request payload for guessing the current player's nationality
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub country: String,
}
