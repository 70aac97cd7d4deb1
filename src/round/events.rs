use serde::{Deserialize, Serialize};

use super::state::RoundId;
use crate::geo::Coordinate;
use crate::hints::{HintKind, HintValue};

/// Zoom level used when the map focuses the answer
pub const REVEAL_ZOOM: u8 = 4;

/// Facts about a round, consumed by the map widget and any other listener.
///
/// Events represent things that have already happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    /// A new round is loading; every marker should go back to its neutral style
    MarkersReset { round_id: RoundId },

    /// A player was fetched and the round accepts guesses
    RoundStarted {
        round_id: RoundId,
        portrait_image_url: String,
    },

    /// A guess was scored; mark the country as attempted
    CountryAttempted {
        round_id: RoundId,
        country: String,
        distance_km: u32,
        points_awarded: u32,
    },

    /// Clear the current map selection
    SelectionReset { round_id: RoundId },

    /// Highlight the answer and recenter the map on it
    CorrectCountryRevealed {
        round_id: RoundId,
        country: String,
        coordinate: Option<Coordinate>,
        zoom: u8,
    },

    HintRevealed {
        round_id: RoundId,
        kind: HintKind,
        label: String,
        value: HintValue,
    },

    RoundWon {
        round_id: RoundId,
        attempts: u32,
        points: u32,
    },

    RoundLost { round_id: RoundId, points: u32 },
}

impl RoundEvent {
    pub fn round_id(&self) -> RoundId {
        match self {
            RoundEvent::MarkersReset { round_id } => *round_id,
            RoundEvent::RoundStarted { round_id, .. } => *round_id,
            RoundEvent::CountryAttempted { round_id, .. } => *round_id,
            RoundEvent::SelectionReset { round_id } => *round_id,
            RoundEvent::CorrectCountryRevealed { round_id, .. } => *round_id,
            RoundEvent::HintRevealed { round_id, .. } => *round_id,
            RoundEvent::RoundWon { round_id, .. } => *round_id,
            RoundEvent::RoundLost { round_id, .. } => *round_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            RoundEvent::MarkersReset { .. } => "markers_reset",
            RoundEvent::RoundStarted { .. } => "round_started",
            RoundEvent::CountryAttempted { .. } => "country_attempted",
            RoundEvent::SelectionReset { .. } => "selection_reset",
            RoundEvent::CorrectCountryRevealed { .. } => "correct_country_revealed",
            RoundEvent::HintRevealed { .. } => "hint_revealed",
            RoundEvent::RoundWon { .. } => "round_won",
            RoundEvent::RoundLost { .. } => "round_lost",
        }
    }
}
