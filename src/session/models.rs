use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

use crate::round::RoundController;

/// One browser tab playing consecutive rounds. Lives only in memory.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: String, // UUID v4 as string
    pub round: RoundController,
    pub rounds_played: u32,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl GameSession {
    /// Creates a session whose first round is still loading
    pub fn new() -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            round: RoundController::new(),
            rounds_played: 0,
            created_at: now,
            last_activity: now,
        }
    }

    /// Replaces the current round wholesale
    pub fn restart_round(&mut self) -> &mut RoundController {
        self.round = RoundController::new();
        self.rounds_played += 1;
        &mut self.round
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Time since the session was created
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }

    pub fn is_idle(&self, threshold: Duration) -> bool {
        (Utc::now() - self.last_activity)
            .to_std()
            .map(|idle| idle >= threshold)
            .unwrap_or(false)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
