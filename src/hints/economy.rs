use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use tracing::debug;

use super::kinds::HintKind;
use crate::player::{FormerClub, Player};

/// Shown when a hint has nothing to reveal
pub const NOT_AVAILABLE: &str = "N/A";

/// What a purchased hint reveals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum HintValue {
    Text(String),
    Clubs(Vec<FormerClub>),
}

impl HintValue {
    pub fn text(value: impl Into<String>) -> Self {
        HintValue::Text(value.into())
    }

    pub fn not_available() -> Self {
        HintValue::Text(NOT_AVAILABLE.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HintValue::Text(text) => Some(text),
            HintValue::Clubs(_) => None,
        }
    }
}

/// Values for computed hints, resolved by the caller before purchasing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HintExtra {
    pub distance_text: Option<String>,
    pub compass_text: Option<String>,
    pub former_clubs: Option<HintValue>,
}

/// Successful purchase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HintReveal {
    pub kind: HintKind,
    pub label: &'static str,
    pub cost: u32,
    pub new_points: u32,
    pub value: HintValue,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HintRejection {
    #[error("already purchased or insufficient points: {0} was already purchased")]
    AlreadyPurchased(HintKind),
    #[error("already purchased or insufficient points: {0} needs a previous guess")]
    RequiresGuess(HintKind),
    #[error("already purchased or insufficient points: {kind} costs {cost}, have {points}")]
    InsufficientPoints { kind: HintKind, cost: u32, points: u32 },
}

/// Availability of a single hint, used to enable or disable its button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintStatus {
    pub kind: HintKind,
    pub label: &'static str,
    pub cost: u32,
    pub can_afford: bool,
    pub purchased: bool,
    pub available: bool,
}

/// Per-round ledger of bought hints
#[derive(Debug, Clone, Default)]
pub struct HintEconomy {
    purchased: BTreeSet<HintKind>,
    last_guessed_country: Option<String>,
}

impl HintEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self, points: u32, kind: HintKind) -> Result<(), HintRejection> {
        if self.purchased.contains(&kind) {
            return Err(HintRejection::AlreadyPurchased(kind));
        }

        if kind.requires_guess() && self.last_guessed_country.is_none() {
            return Err(HintRejection::RequiresGuess(kind));
        }

        let cost = kind.cost();
        if points < cost {
            return Err(HintRejection::InsufficientPoints { kind, cost, points });
        }

        Ok(())
    }

    pub fn can_purchase(&self, points: u32, kind: HintKind) -> bool {
        self.check(points, kind).is_ok()
    }

    /// Buys `kind` with the current balance.
    ///
    /// Direct hints read the player field; computed hints take their value from `extra`.
    /// A rejected purchase leaves the ledger untouched.
    pub fn purchase(
        &mut self,
        kind: HintKind,
        points: u32,
        player: &Player,
        extra: HintExtra,
    ) -> Result<HintReveal, HintRejection> {
        self.check(points, kind)?;

        let definition = kind.definition();
        self.purchased.insert(kind);

        let value = match (kind, definition.source_field) {
            (_, Some(field)) => field
                .read(player)
                .map(HintValue::text)
                .unwrap_or_else(HintValue::not_available),
            (HintKind::Distance, None) => extra
                .distance_text
                .map(HintValue::Text)
                .unwrap_or_else(HintValue::not_available),
            (HintKind::Compass, None) => extra
                .compass_text
                .map(HintValue::Text)
                .unwrap_or_else(HintValue::not_available),
            (_, None) => extra.former_clubs.unwrap_or_else(HintValue::not_available),
        };

        debug!(hint = %kind, cost = definition.cost, "Hint purchased");

        Ok(HintReveal {
            kind,
            label: definition.label,
            cost: definition.cost,
            new_points: points - definition.cost,
            value,
        })
    }

    pub fn is_purchased(&self, kind: HintKind) -> bool {
        self.purchased.contains(&kind)
    }

    pub fn purchased(&self) -> impl Iterator<Item = HintKind> + '_ {
        self.purchased.iter().copied()
    }

    pub fn set_last_guessed_country(&mut self, country: impl Into<String>) {
        self.last_guessed_country = Some(country.into());
    }

    pub fn last_guessed_country(&self) -> Option<&str> {
        self.last_guessed_country.as_deref()
    }

    pub fn reset(&mut self) {
        self.purchased.clear();
        self.last_guessed_country = None;
    }

    pub fn statuses(&self, points: u32) -> Vec<HintStatus> {
        HintKind::iter()
            .map(|kind| HintStatus {
                kind,
                label: kind.label(),
                cost: kind.cost(),
                can_afford: points >= kind.cost(),
                purchased: self.is_purchased(kind),
                available: self.can_purchase(points, kind),
            })
            .collect()
    }
}
