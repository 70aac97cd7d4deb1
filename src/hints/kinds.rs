use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::player::Player;

/// Every hint a player can buy during a round
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum HintKind {
    Position,
    Team,
    Distance,
    Surname,
    Fullname,
    FormerTeams,
    Compass,
    BirthCity,
}

/// Player attribute a direct hint reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    Position,
    Team,
    LastName,
    DisplayName,
    BirthLocation,
}

impl PlayerField {
    pub fn read<'a>(&self, player: &'a Player) -> Option<&'a str> {
        match self {
            PlayerField::Position => player.position.as_deref(),
            PlayerField::Team => player.team.as_deref(),
            PlayerField::LastName => player.last_name.as_deref(),
            PlayerField::DisplayName => Some(player.display_name.as_str()),
            PlayerField::BirthLocation => player.birth_location.as_deref(),
        }
    }
}

/// Static price and presentation of a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintDefinition {
    pub cost: u32,
    /// `None` for hints computed at purchase time
    pub source_field: Option<PlayerField>,
    pub label: &'static str,
}

impl HintKind {
    pub fn definition(&self) -> HintDefinition {
        let (cost, source_field, label) = match self {
            HintKind::Position => (10, Some(PlayerField::Position), "Position"),
            HintKind::Team => (20, Some(PlayerField::Team), "Team"),
            HintKind::Distance => (30, None, "Exact Distance"),
            HintKind::Surname => (30, Some(PlayerField::LastName), "Surname"),
            HintKind::Fullname => (40, Some(PlayerField::DisplayName), "Full Name"),
            HintKind::FormerTeams => (50, None, "Former Clubs"),
            HintKind::Compass => (70, None, "Compass"),
            HintKind::BirthCity => (80, Some(PlayerField::BirthLocation), "Birth City"),
        };

        HintDefinition {
            cost,
            source_field,
            label,
        }
    }

    pub fn cost(&self) -> u32 {
        self.definition().cost
    }

    pub fn label(&self) -> &'static str {
        self.definition().label
    }

    pub fn is_computed(&self) -> bool {
        self.definition().source_field.is_none()
    }

    /// Hints that are measured from the most recent guess
    pub fn requires_guess(&self) -> bool {
        matches!(self, HintKind::Distance | HintKind::Compass)
    }
}
