use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::models::Player;
use super::source::PlayerSource;
use crate::geo::CoordinateLookup;

/// Lowest TheSportsDB id sampled for a round
pub const PLAYER_ID_MIN: u64 = 34_145_400;
/// Width of the sampled id range (inclusive upper bound is min + span)
pub const PLAYER_ID_SPAN: u64 = 16_400;
pub const DEFAULT_MAX_RETRIES: u32 = 20;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PickError {
    #[error("Failed to fetch a valid soccer player after {0} attempts")]
    RetriesExhausted(u32),
}

/// Samples random ids until it finds a player usable for a round
#[derive(Debug, Clone)]
pub struct RandomPlayerPicker {
    min_id: u64,
    span: u64,
    max_retries: u32,
}

impl Default for RandomPlayerPicker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl RandomPlayerPicker {
    pub fn new(max_retries: u32) -> Self {
        Self {
            min_id: PLAYER_ID_MIN,
            span: PLAYER_ID_SPAN,
            max_retries,
        }
    }

    pub fn next_id(&self) -> u64 {
        rand::rng().random_range(self.min_id..=self.min_id + self.span)
    }

    /// Fetches random ids until one is a soccer player with an image and a mapped nationality.
    ///
    /// Lookup errors count as a failed attempt.
    #[instrument(skip(self, source, countries))]
    pub async fn pick(
        &self,
        source: &dyn PlayerSource,
        countries: &dyn CoordinateLookup,
    ) -> Result<Player, PickError> {
        for attempt in 1..=self.max_retries {
            let id = self.next_id();
            debug!(player_id = id, attempt, max_retries = self.max_retries, "Fetching player");

            let listing = match source.fetch_by_id(id).await {
                Ok(Some(listing)) => listing,
                Ok(None) => {
                    debug!(player_id = id, "No player with this id");
                    continue;
                }
                Err(e) => {
                    warn!(player_id = id, error = %e, "Player lookup failed");
                    continue;
                }
            };

            if !listing.is_soccer() {
                debug!(
                    player = %listing.name(),
                    sport = listing.str_sport.as_deref().unwrap_or("unknown"),
                    "Skipping non-soccer player"
                );
                continue;
            }

            let name = listing.name().to_string();
            let Some(player) = listing.into_player() else {
                debug!(player = %name, "Skipping soccer player without image or nationality");
                continue;
            };

            if countries.lookup(&player.nationality).is_none() {
                debug!(
                    player = %player.display_name,
                    nationality = %player.nationality,
                    "Skipping player with unmapped nationality"
                );
                continue;
            }

            info!(player = %player.display_name, attempt, "Soccer player found");
            return Ok(player);
        }

        Err(PickError::RetriesExhausted(self.max_retries))
    }
}
