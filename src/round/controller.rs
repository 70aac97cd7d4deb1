// A round is a small state machine:
//
//   LOADING -> AWAITING_GUESS -> GUESS_SUBMITTED -> { WON | LOST | AWAITING_GUESS }
//
// WON and LOST are terminal; a new round is a new controller.
//
// The controller is synchronous. Anything that needs network access (fetching the
// player, former clubs) is resolved by the caller and handed in.
use serde::Serialize;
use std::mem;
use tracing::{debug, info};

use super::events::{RoundEvent, REVEAL_ZOOM};
use super::state::{RoundId, RoundPhase, RoundState};
use crate::geo::{points_for_distance, CoordinateLookup, GeoError};
use crate::hints::{
    formatting, HintEconomy, HintExtra, HintKind, HintRejection, HintReveal, HintStatus,
    HintValue, NOT_AVAILABLE,
};
use crate::player::Player;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RoundError {
    #[error("Round is still loading a player")]
    NotReady,
    #[error("Round already has a player")]
    AlreadyStarted,
    #[error("Round is over")]
    RoundOver,
    #[error("No country selected")]
    NoCountrySelected,
    #[error("Country not found: {0}")]
    CountryNotFound(String),
    #[error("Country table is unusable: {0}")]
    CountryTable(String),
    #[error("Hint rejected: {0}")]
    HintRejected(#[from] HintRejection),
}

impl From<GeoError> for RoundError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::CountryNotFound(country) => RoundError::CountryNotFound(country),
            GeoError::InvalidDataset(msg) => RoundError::CountryTable(msg),
        }
    }
}

/// Result of a scored guess
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessOutcome {
    pub country: String,
    pub distance_km: u32,
    pub points_awarded: u32,
    pub total_points: u32,
    pub attempts: u32,
    pub attempts_left: u32,
    pub correct: bool,
    pub phase: RoundPhase,
}

/// Player reveal shown once the round is over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub won: bool,
    pub player_name: String,
    pub nationality: String,
    pub team: String,
    pub position: String,
    pub portrait_image_url: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub points: u32,
}

/// Everything a client needs to render the round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    #[serde(flatten)]
    pub state: RoundState,
    pub portrait_image_url: Option<String>,
    pub revealed_hints: Vec<HintReveal>,
    pub hints: Vec<HintStatus>,
    pub summary: Option<RoundSummary>,
}

#[derive(Debug, Clone)]
pub struct RoundController {
    state: RoundState,
    player: Option<Player>,
    hints: HintEconomy,
    revealed: Vec<HintReveal>,
    pending_events: Vec<RoundEvent>,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundController {
    /// Fresh round in LOADING with a new round id and an empty hint ledger
    pub fn new() -> Self {
        let state = RoundState::new();
        let mut hints = HintEconomy::new();
        hints.reset();

        let round_id = state.round_id;
        Self {
            state,
            player: None,
            hints,
            revealed: Vec::new(),
            pending_events: vec![RoundEvent::MarkersReset { round_id }],
        }
    }

    pub fn round_id(&self) -> RoundId {
        self.state.round_id
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn points(&self) -> u32 {
        self.state.points
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn hints(&self) -> &HintEconomy {
        &self.hints
    }

    pub fn hint_statuses(&self) -> Vec<HintStatus> {
        self.hints.statuses(self.state.points)
    }

    /// Drains events produced since the last call
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        mem::take(&mut self.pending_events)
    }

    /// LOADING -> AWAITING_GUESS once a valid player is available
    pub fn begin(&mut self, player: Player) -> Result<(), RoundError> {
        if self.state.phase != RoundPhase::Loading {
            return Err(RoundError::AlreadyStarted);
        }

        info!(
            round_id = %self.state.round_id,
            player = %player.display_name,
            "Round started"
        );

        self.pending_events.push(RoundEvent::RoundStarted {
            round_id: self.state.round_id,
            portrait_image_url: player.portrait_image_url.clone(),
        });
        self.player = Some(player);
        self.state.phase = RoundPhase::AwaitingGuess;
        Ok(())
    }

    fn ensure_accepting(&self) -> Result<(), RoundError> {
        match self.state.phase {
            RoundPhase::Loading => Err(RoundError::NotReady),
            RoundPhase::Won | RoundPhase::Lost => Err(RoundError::RoundOver),
            RoundPhase::AwaitingGuess | RoundPhase::GuessSubmitted => Ok(()),
        }
    }

    /// Scores a guess and advances the round.
    ///
    /// Unknown countries are rejected before an attempt is consumed.
    pub fn submit_guess(
        &mut self,
        country: &str,
        countries: &dyn CoordinateLookup,
    ) -> Result<GuessOutcome, RoundError> {
        self.ensure_accepting()?;
        let player = self.player.as_ref().ok_or(RoundError::NotReady)?;

        let country = country.trim();
        if country.is_empty() {
            return Err(RoundError::NoCountrySelected);
        }

        let distance_km = countries.distance_between(country, &player.nationality)?;
        let correct = country == player.nationality;
        let nationality = player.nationality.clone();

        self.state.phase = RoundPhase::GuessSubmitted;
        self.state.attempts += 1;

        let points_awarded = points_for_distance(distance_km);
        self.state.points += points_awarded;
        self.state.guesses.push(country.to_string());
        self.hints.set_last_guessed_country(country);

        let round_id = self.state.round_id;
        debug!(
            round_id = %round_id,
            country = %country,
            distance_km,
            points_awarded,
            attempts = self.state.attempts,
            "Guess scored"
        );

        self.pending_events.push(RoundEvent::CountryAttempted {
            round_id,
            country: country.to_string(),
            distance_km,
            points_awarded,
        });

        if correct {
            self.finish(RoundPhase::Won, &nationality, countries);
        } else if self.state.attempts >= self.state.max_attempts {
            self.finish(RoundPhase::Lost, &nationality, countries);
        } else {
            self.state.phase = RoundPhase::AwaitingGuess;
            self.pending_events
                .push(RoundEvent::SelectionReset { round_id });
        }

        Ok(GuessOutcome {
            country: country.to_string(),
            distance_km,
            points_awarded,
            total_points: self.state.points,
            attempts: self.state.attempts,
            attempts_left: self.state.attempts_left(),
            correct,
            phase: self.state.phase,
        })
    }

    fn finish(&mut self, phase: RoundPhase, nationality: &str, countries: &dyn CoordinateLookup) {
        let round_id = self.state.round_id;
        self.state.phase = phase;

        self.pending_events.push(RoundEvent::CorrectCountryRevealed {
            round_id,
            country: nationality.to_string(),
            coordinate: countries.lookup(nationality),
            zoom: REVEAL_ZOOM,
        });

        let outcome = if phase == RoundPhase::Won {
            RoundEvent::RoundWon {
                round_id,
                attempts: self.state.attempts,
                points: self.state.points,
            }
        } else {
            RoundEvent::RoundLost {
                round_id,
                points: self.state.points,
            }
        };
        self.pending_events.push(outcome);

        info!(
            round_id = %round_id,
            phase = ?phase,
            attempts = self.state.attempts,
            points = self.state.points,
            "Round finished"
        );
    }

    /// Resolves the synchronous computed hints (distance and compass from the last guess).
    ///
    /// Former clubs need a remote lookup and are left to the caller.
    pub fn hint_context(&self, kind: HintKind, countries: &dyn CoordinateLookup) -> HintExtra {
        let (Some(player), Some(last_guess)) =
            (self.player.as_ref(), self.hints.last_guessed_country())
        else {
            return HintExtra::default();
        };

        match kind {
            HintKind::Distance => {
                let text = match countries.distance_between(last_guess, &player.nationality) {
                    Ok(km) => formatting::distance_text(last_guess, km),
                    Err(_) => formatting::CALCULATION_FAILED.to_string(),
                };
                HintExtra {
                    distance_text: Some(text),
                    ..Default::default()
                }
            }
            HintKind::Compass => {
                let text = match countries.compass_between(last_guess, &player.nationality) {
                    Ok(Some(direction)) => formatting::compass_text(last_guess, direction),
                    Ok(None) | Err(_) => formatting::CALCULATION_FAILED.to_string(),
                };
                HintExtra {
                    compass_text: Some(text),
                    ..Default::default()
                }
            }
            _ => HintExtra::default(),
        }
    }

    /// Spends points on a hint. A rejected purchase leaves the balance unchanged.
    pub fn purchase_hint(
        &mut self,
        kind: HintKind,
        extra: HintExtra,
    ) -> Result<HintReveal, RoundError> {
        self.ensure_accepting()?;
        let player = self.player.as_ref().ok_or(RoundError::NotReady)?;
        let mut reveal = self
            .hints
            .purchase(kind, self.state.points, player, extra)?;

        if kind == HintKind::BirthCity {
            if let HintValue::Text(location) = &reveal.value {
                if location != NOT_AVAILABLE {
                    reveal.value = HintValue::text(formatting::birth_city(location));
                }
            }
        }

        self.state.points = reveal.new_points;
        self.revealed.push(reveal.clone());
        self.pending_events.push(RoundEvent::HintRevealed {
            round_id: self.state.round_id,
            kind,
            label: reveal.label.to_string(),
            value: reveal.value.clone(),
        });

        debug!(
            round_id = %self.state.round_id,
            hint = %kind,
            points_left = self.state.points,
            "Hint revealed"
        );

        Ok(reveal)
    }

    /// Final player reveal, only once the round is over
    pub fn summary(&self) -> Option<RoundSummary> {
        if !self.state.phase.is_over() {
            return None;
        }
        let player = self.player.as_ref()?;

        Some(RoundSummary {
            won: self.state.phase == RoundPhase::Won,
            player_name: player.display_name.clone(),
            nationality: player.nationality.clone(),
            team: player.team.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            position: player
                .position
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            portrait_image_url: player.portrait_image_url.clone(),
            attempts: self.state.attempts,
            max_attempts: self.state.max_attempts,
            points: self.state.points,
        })
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            state: self.state.clone(),
            portrait_image_url: self
                .player
                .as_ref()
                .map(|p| p.portrait_image_url.clone()),
            revealed_hints: self.revealed.clone(),
            hints: self.hint_statuses(),
            summary: self.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::StaticCountryTable;
    use crate::player::test_utils::sample_player;

    fn started_round(nationality: &str) -> RoundController {
        let mut round = RoundController::new();
        round.begin(sample_player(nationality)).unwrap();
        round.take_events();
        round
    }

    fn countries() -> StaticCountryTable {
        StaticCountryTable::bundled().unwrap()
    }

    #[test]
    fn test_new_round_is_loading() {
        let mut round = RoundController::new();
        assert_eq!(round.phase(), RoundPhase::Loading);
        assert!(round.player().is_none());

        let events = round.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RoundEvent::MarkersReset { .. }));
        assert!(round.take_events().is_empty());
    }

    #[test]
    fn test_begin_moves_to_awaiting_guess() {
        let mut round = RoundController::new();
        round.begin(sample_player("Argentina")).unwrap();

        assert_eq!(round.phase(), RoundPhase::AwaitingGuess);
        assert!(matches!(
            round.begin(sample_player("Spain")),
            Err(RoundError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_guess_before_player_loaded() {
        let mut round = RoundController::new();
        let result = round.submit_guess("Brazil", &countries());
        assert!(matches!(result, Err(RoundError::NotReady)));
        assert_eq!(round.attempts(), 0);
    }

    #[test]
    fn test_wrong_guess_scores_by_distance() {
        let mut round = started_round("Argentina");

        let outcome = round.submit_guess("Brazil", &countries()).unwrap();

        assert_eq!(outcome.points_awarded, 30);
        assert_eq!(outcome.total_points, 30);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.attempts_left, 9);
        assert!(!outcome.correct);
        assert_eq!(outcome.phase, RoundPhase::AwaitingGuess);
        assert_eq!(round.hints().last_guessed_country(), Some("Brazil"));

        let events = round.take_events();
        assert!(matches!(
            &events[0],
            RoundEvent::CountryAttempted { country, points_awarded: 30, .. } if country == "Brazil"
        ));
        assert!(matches!(events[1], RoundEvent::SelectionReset { .. }));
    }

    #[test]
    fn test_correct_guess_wins() {
        let mut round = started_round("Argentina");
        round.submit_guess("Brazil", &countries()).unwrap();

        let outcome = round.submit_guess("Argentina", &countries()).unwrap();

        assert!(outcome.correct);
        assert_eq!(outcome.distance_km, 0);
        assert_eq!(outcome.points_awarded, 50);
        assert_eq!(outcome.total_points, 80);
        assert_eq!(round.phase(), RoundPhase::Won);

        let summary = round.summary().unwrap();
        assert!(summary.won);
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.points, 80);
        assert_eq!(summary.team, "Inter Miami");

        let events = round.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, RoundEvent::CorrectCountryRevealed { country, coordinate: Some(_), .. } if country == "Argentina")));
        assert!(matches!(events.last(), Some(RoundEvent::RoundWon { attempts: 2, .. })));
    }

    #[test]
    fn test_win_is_case_sensitive_name_match() {
        let mut round = started_round("Argentina");
        // Lowercase names are not in the table at all
        assert!(matches!(
            round.submit_guess("argentina", &countries()),
            Err(RoundError::CountryNotFound(_))
        ));
        assert_eq!(round.phase(), RoundPhase::AwaitingGuess);
    }

    #[test]
    fn test_ten_wrong_guesses_lose() {
        let mut round = started_round("Argentina");
        let table = countries();

        for i in 1..=9 {
            let outcome = round.submit_guess("Japan", &table).unwrap();
            assert_eq!(outcome.attempts, i);
            assert_eq!(round.phase(), RoundPhase::AwaitingGuess);
        }

        let last = round.submit_guess("Japan", &table).unwrap();
        assert_eq!(last.attempts, 10);
        assert_eq!(last.phase, RoundPhase::Lost);
        assert_eq!(round.points(), 100);

        let summary = round.summary().unwrap();
        assert!(!summary.won);
        assert_eq!(summary.nationality, "Argentina");

        assert!(matches!(
            round.submit_guess("Argentina", &table),
            Err(RoundError::RoundOver)
        ));
        assert_eq!(round.attempts(), 10);
    }

    #[test]
    fn test_tenth_guess_correct_wins() {
        let mut round = started_round("Argentina");
        let table = countries();
        for _ in 0..9 {
            round.submit_guess("Japan", &table).unwrap();
        }

        let outcome = round.submit_guess("Argentina", &table).unwrap();
        assert_eq!(outcome.phase, RoundPhase::Won);
    }

    #[test]
    fn test_unknown_country_does_not_consume_attempt() {
        let mut round = started_round("Argentina");

        let result = round.submit_guess("Atlantis", &countries());

        assert!(matches!(result, Err(RoundError::CountryNotFound(c)) if c == "Atlantis"));
        assert_eq!(round.attempts(), 0);
        assert_eq!(round.points(), 0);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut round = started_round("Argentina");
        assert!(matches!(
            round.submit_guess("  ", &countries()),
            Err(RoundError::NoCountrySelected)
        ));
    }

    #[test]
    fn test_distance_hint_uses_most_recent_guess() {
        let mut round = started_round("Argentina");
        let table = countries();
        round.submit_guess("Japan", &table).unwrap();
        round.submit_guess("Brazil", &table).unwrap();

        let extra = round.hint_context(HintKind::Distance, &table);
        let reveal = round.purchase_hint(HintKind::Distance, extra).unwrap();

        let km = table.distance_between("Brazil", "Argentina").unwrap();
        assert_eq!(
            reveal.value,
            HintValue::text(formatting::distance_text("Brazil", km))
        );
        assert_eq!(round.points(), 10 + 30 - 30);
    }

    #[test]
    fn test_compass_hint_requires_guess() {
        let mut round = started_round("Argentina");
        let table = countries();

        let extra = round.hint_context(HintKind::Compass, &table);
        assert_eq!(extra, HintExtra::default());
        assert!(matches!(
            round.purchase_hint(HintKind::Compass, extra),
            Err(RoundError::HintRejected(HintRejection::RequiresGuess(HintKind::Compass)))
        ));
    }

    #[test]
    fn test_compass_hint_text() {
        let mut round = started_round("Argentina");
        let table = countries();
        round.submit_guess("Uruguay", &table).unwrap();
        round.submit_guess("Uruguay", &table).unwrap();
        round.submit_guess("Spain", &table).unwrap();

        let extra = round.hint_context(HintKind::Compass, &table);
        assert_eq!(extra.compass_text.as_deref(), Some("South-West of Spain"));

        let reveal = round.purchase_hint(HintKind::Compass, extra).unwrap();
        assert_eq!(reveal.cost, 70);
        assert_eq!(round.points(), 40 + 40 + 10 - 70);
    }

    #[test]
    fn test_birth_city_hint_is_trimmed() {
        let mut round = started_round("Argentina");
        let table = countries();
        round.submit_guess("Uruguay", &table).unwrap();
        round.submit_guess("Uruguay", &table).unwrap();

        let reveal = round
            .purchase_hint(HintKind::BirthCity, HintExtra::default())
            .unwrap();
        assert_eq!(reveal.value, HintValue::text("Rosario"));
    }

    #[test]
    fn test_rejected_hint_keeps_points() {
        let mut round = started_round("Argentina");
        round.submit_guess("Brazil", &countries()).unwrap();

        let result = round.purchase_hint(HintKind::Fullname, HintExtra::default());

        assert!(matches!(
            result,
            Err(RoundError::HintRejected(HintRejection::InsufficientPoints { .. }))
        ));
        assert_eq!(round.points(), 30);
        assert!(round.snapshot().revealed_hints.is_empty());
    }

    #[test]
    fn test_hints_blocked_after_round_over() {
        let mut round = started_round("Argentina");
        round.submit_guess("Argentina", &countries()).unwrap();

        assert!(matches!(
            round.purchase_hint(HintKind::Position, HintExtra::default()),
            Err(RoundError::RoundOver)
        ));
    }

    #[test]
    fn test_snapshot_hides_player_until_over() {
        let mut round = started_round("Argentina");
        let snapshot = round.snapshot();
        assert!(snapshot.summary.is_none());
        assert_eq!(
            snapshot.portrait_image_url.as_deref(),
            Some("https://example.com/messi.png")
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "AWAITING_GUESS");
        assert_eq!(json["max_attempts"], 10);
        assert!(json.get("nationality").is_none());

        round.submit_guess("Argentina", &countries()).unwrap();
        assert!(round.snapshot().summary.is_some());
    }

    #[test]
    fn test_geo_errors_keep_their_meaning() {
        assert!(matches!(
            RoundError::from(GeoError::CountryNotFound("Atlantis".to_string())),
            RoundError::CountryNotFound(country) if country == "Atlantis"
        ));
        assert!(matches!(
            RoundError::from(GeoError::InvalidDataset("bad json".to_string())),
            RoundError::CountryTable(msg) if msg == "bad json"
        ));
    }
}
