use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::GameSession;

/// In-memory store of game sessions
#[derive(Debug, Clone, Default)]
pub struct SessionRepository {
    /// A mapping from session ID to session
    sessions: Arc<RwLock<HashMap<String, GameSession>>>,
}

impl SessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn create_session(&self, session: GameSession) -> bool {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            warn!("Session already exists in memory");
            return false;
        }
        sessions.insert(session.id.clone(), session);
        debug!("Session created in memory");
        true
    }

    pub async fn get_session(&self, session_id: &str) -> Option<GameSession> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    pub async fn session_exists(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    /// Runs `f` against a session under the write lock and marks it active.
    ///
    /// Returns `None` if the session does not exist. `f` must not block.
    pub async fn with_session_mut<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(session_id)?;
        session.touch();
        Some(f(session))
    }

    pub async fn delete_session(&self, session_id: &str) -> Option<GameSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Removes every session idle for at least `threshold`, returning their ids
    #[instrument(skip(self))]
    pub async fn remove_idle_sessions(&self, threshold: Duration) -> Vec<String> {
        let mut sessions = self.sessions.write().await;
        let idle: Vec<String> = sessions
            .values()
            .filter(|session| session.is_idle(threshold))
            .map(|session| session.id.clone())
            .collect();

        for session_id in &idle {
            if let Some(session) = sessions.remove(session_id) {
                debug!(
                    session_id = %session_id,
                    age_minutes = session.age().num_minutes(),
                    rounds_played = session.rounds_played,
                    "Idle session removed"
                );
            }
        }

        debug!(removed = idle.len(), remaining = sessions.len(), "Idle sessions removed");
        idle
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
