// Turns raw lookups into the text shown for computed hints
use std::collections::HashSet;

use super::economy::HintValue;
use crate::geo::CompassDirection;
use crate::player::FormerClub;

/// Most badges shown by the former clubs hint
pub const MAX_CLUB_BADGES: usize = 8;

pub const NO_FORMER_CLUBS: &str = "No former clubs found";
pub const NO_FORMER_CLUB_BADGES: &str = "No former clubs with a badge found";
pub const FORMER_CLUBS_LOOKUP_FAILED: &str = "Could not look up former clubs";
pub const CALCULATION_FAILED: &str = "Could not calculate";

/// Keeps only the city part of a birth location such as "Rosario, Argentina"
pub fn birth_city(birth_location: &str) -> &str {
    birth_location
        .split(',')
        .next()
        .unwrap_or(birth_location)
        .trim()
}

pub fn distance_text(from_country: &str, km: u32) -> String {
    format!("{} is {} km away", from_country, km)
}

pub fn compass_text(from_country: &str, direction: CompassDirection) -> String {
    format!("{} of {}", direction.name(), from_country)
}

/// Distinct clubs (by name) that have a badge, in source order, capped at [`MAX_CLUB_BADGES`]
pub fn select_club_badges(clubs: &[FormerClub]) -> Vec<FormerClub> {
    let mut seen: HashSet<String> = HashSet::new();

    clubs
        .iter()
        .filter(|club| club.badge_image_url.is_some() && seen.insert(club.club_name.clone()))
        .take(MAX_CLUB_BADGES)
        .cloned()
        .collect()
}

/// Builds the former clubs hint value from a lookup result
pub fn former_clubs_value<E>(lookup: Result<Option<Vec<FormerClub>>, E>) -> HintValue {
    match lookup {
        Ok(Some(clubs)) if !clubs.is_empty() => {
            let badges = select_club_badges(&clubs);
            if badges.is_empty() {
                HintValue::text(NO_FORMER_CLUB_BADGES)
            } else {
                HintValue::Clubs(badges)
            }
        }
        Ok(_) => HintValue::text(NO_FORMER_CLUBS),
        Err(_) => HintValue::text(FORMER_CLUBS_LOOKUP_FAILED),
    }
}
