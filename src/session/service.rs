use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use super::{models::GameSession, repository::SessionRepository};
use crate::{
    event::EventBus,
    geo::CoordinateLookup,
    hints::{formatting, HintKind, HintReveal, HintStatus},
    player::{PlayerSource, RandomPlayerPicker},
    round::{GuessOutcome, RoundError, RoundEvent, RoundId, RoundSnapshot},
    shared::AppError,
};

/// Drives sessions: fetches players, scores guesses, sells hints and publishes round events.
///
/// Network lookups never run under the session lock. Their results are applied only
/// if the round they were started for is still the session's current round.
pub struct GameService {
    sessions: SessionRepository,
    player_source: Arc<dyn PlayerSource>,
    countries: Arc<dyn CoordinateLookup>,
    picker: RandomPlayerPicker,
    event_bus: EventBus,
}

impl GameService {
    pub fn new(
        player_source: Arc<dyn PlayerSource>,
        countries: Arc<dyn CoordinateLookup>,
        picker: RandomPlayerPicker,
        event_bus: EventBus,
    ) -> Self {
        Self {
            sessions: SessionRepository::new(),
            player_source,
            countries,
            picker,
            event_bus,
        }
    }

    /// Creates a session and starts its first round.
    ///
    /// If no player can be found the session is discarded.
    #[instrument(skip(self))]
    pub async fn create_session(&self) -> Result<(String, RoundSnapshot), AppError> {
        let session = GameSession::new();
        let session_id = session.id.clone();

        if !self.sessions.create_session(session).await {
            return Err(AppError::Internal);
        }
        info!(session_id = %session_id, "Session created");

        match self.start_round(&session_id).await {
            Ok(snapshot) => Ok((session_id, snapshot)),
            Err(e) => {
                self.remove_session(&session_id).await;
                Err(e)
            }
        }
    }

    /// Replaces the session's round with a new one and loads a random player into it
    #[instrument(skip(self))]
    pub async fn start_round(&self, session_id: &str) -> Result<RoundSnapshot, AppError> {
        let (round_id, events) = self
            .sessions
            .with_session_mut(session_id, |session| {
                let round = session.restart_round();
                (round.round_id(), round.take_events())
            })
            .await
            .ok_or_else(|| session_not_found(session_id))?;
        self.event_bus.emit_all(session_id, events).await;

        let player = self
            .picker
            .pick(self.player_source.as_ref(), self.countries.as_ref())
            .await
            .map_err(|e| {
                warn!(session_id = %session_id, round_id = %round_id, error = %e, "Could not start round");
                AppError::PlayerUnavailable(e.to_string())
            })?;

        let (snapshot, events) = self
            .apply_to_round(session_id, round_id, |session| {
                session.round.begin(player)?;
                Ok((session.round.snapshot(), session.round.take_events()))
            })
            .await?;
        self.event_bus.emit_all(session_id, events).await;

        Ok(snapshot)
    }

    #[instrument(skip(self))]
    pub async fn submit_guess(
        &self,
        session_id: &str,
        country: &str,
    ) -> Result<GuessOutcome, AppError> {
        let countries = self.countries.as_ref();

        let (outcome, events) = self
            .sessions
            .with_session_mut(session_id, |session| {
                let outcome = session.round.submit_guess(country, countries)?;
                Ok::<_, RoundError>((outcome, session.round.take_events()))
            })
            .await
            .ok_or_else(|| session_not_found(session_id))??;
        self.event_bus.emit_all(session_id, events).await;

        info!(
            session_id = %session_id,
            country = %country,
            points_awarded = outcome.points_awarded,
            phase = ?outcome.phase,
            "Guess submitted"
        );

        Ok(outcome)
    }

    /// Buys a hint for the current round.
    ///
    /// Former clubs are fetched before purchasing; the purchase is dropped if a new
    /// round started in the meantime.
    #[instrument(skip(self))]
    pub async fn purchase_hint(
        &self,
        session_id: &str,
        kind: HintKind,
    ) -> Result<HintReveal, AppError> {
        let countries = self.countries.as_ref();

        let (round_id, mut extra, former_clubs_of) = self
            .sessions
            .with_session_mut(session_id, |session| {
                let round = &session.round;
                let lookup = match (kind, round.player()) {
                    (HintKind::FormerTeams, Some(player))
                        if round.hints().can_purchase(round.points(), kind) =>
                    {
                        Some(player.id.clone())
                    }
                    _ => None,
                };
                (round.round_id(), round.hint_context(kind, countries), lookup)
            })
            .await
            .ok_or_else(|| session_not_found(session_id))?;

        if let Some(player_id) = former_clubs_of {
            let lookup = self.player_source.fetch_former_clubs(&player_id).await;
            if let Err(e) = &lookup {
                warn!(player_id = %player_id, error = %e, "Former clubs lookup failed");
            }
            extra.former_clubs = Some(formatting::former_clubs_value(lookup));
        }

        let (reveal, events) = self
            .apply_to_round(session_id, round_id, |session| {
                let reveal = session.round.purchase_hint(kind, extra)?;
                Ok((reveal, session.round.take_events()))
            })
            .await?;
        self.event_bus.emit_all(session_id, events).await;

        info!(
            session_id = %session_id,
            hint = %kind,
            points_left = reveal.new_points,
            "Hint purchased"
        );

        Ok(reveal)
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<RoundSnapshot, AppError> {
        self.sessions
            .get_session(session_id)
            .await
            .map(|session| session.round.snapshot())
            .ok_or_else(|| session_not_found(session_id))
    }

    pub async fn hint_statuses(&self, session_id: &str) -> Result<Vec<HintStatus>, AppError> {
        self.sessions
            .get_session(session_id)
            .await
            .map(|session| session.round.hint_statuses())
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Opens a receiver for the round events of an existing session.
    ///
    /// The stream ends when the session is removed.
    pub async fn subscribe(
        &self,
        session_id: &str,
    ) -> Result<broadcast::Receiver<RoundEvent>, AppError> {
        if !self.sessions.session_exists(session_id).await {
            return Err(session_not_found(session_id));
        }

        let receiver = self.event_bus.subscribe(session_id).await;

        // Removed while subscribing: drop the channel again so it cannot leak
        if !self.sessions.session_exists(session_id).await {
            self.event_bus.close_session(session_id).await;
            return Err(session_not_found(session_id));
        }

        debug!(session_id = %session_id, "Round event subscriber added");
        Ok(receiver)
    }

    pub async fn remove_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.delete_session(session_id).await.is_some();
        self.event_bus.close_session(session_id).await;
        removed
    }

    /// Drops sessions idle for at least `threshold`
    pub async fn remove_idle_sessions(&self, threshold: Duration) -> usize {
        let removed = self.sessions.remove_idle_sessions(threshold).await;
        for session_id in &removed {
            self.event_bus.close_session(session_id).await;
        }
        removed.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.session_count().await
    }

    /// Runs `f` only if `round_id` is still the session's current round
    async fn apply_to_round<R>(
        &self,
        session_id: &str,
        round_id: RoundId,
        f: impl FnOnce(&mut GameSession) -> Result<R, RoundError>,
    ) -> Result<R, AppError> {
        self.sessions
            .with_session_mut(session_id, |session| {
                if session.round.round_id() != round_id {
                    warn!(
                        session_id = %session_id,
                        stale_round_id = %round_id,
                        current_round_id = %session.round.round_id(),
                        "Discarding result for a replaced round"
                    );
                    return Err(AppError::StaleRound);
                }
                f(session).map_err(AppError::from)
            })
            .await
            .ok_or_else(|| session_not_found(session_id))?
    }
}

fn session_not_found(session_id: &str) -> AppError {
    AppError::NotFound(format!("Session not found: {}", session_id))
}
