use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one round; async completions carry it so stale results can be dropped
pub type RoundId = Uuid;

/// Number of guesses allowed per round
pub const MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundPhase {
    /// Waiting for a player to be fetched
    Loading,
    AwaitingGuess,
    /// A guess is being scored; never observable between calls
    GuessSubmitted,
    Won,
    Lost,
}

impl RoundPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// Score and progress of the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    pub round_id: RoundId,
    pub phase: RoundPhase,
    pub points: u32,
    pub attempts: u32,
    pub max_attempts: u32,
    /// Guessed countries, oldest first
    pub guesses: Vec<String>,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            round_id: Uuid::new_v4(),
            phase: RoundPhase::Loading,
            points: 0,
            attempts: 0,
            max_attempts: MAX_ATTEMPTS,
            guesses: Vec::new(),
        }
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}
