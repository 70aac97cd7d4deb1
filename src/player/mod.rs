// Player data: TheSportsDB models, the remote source and random player selection

// Public API - what other modules can use
pub use models::{FormerClub, Player, SportsDbFormerTeam, SportsDbPlayer, REQUIRED_SPORT};
pub use picker::{PickError, RandomPlayerPicker, DEFAULT_MAX_RETRIES, PLAYER_ID_MIN, PLAYER_ID_SPAN};
pub use source::{PlayerSource, PlayerSourceError};
pub use sportsdb::{SportsDbClient, DEFAULT_BASE_URL};

// Internal modules
mod models;
mod picker;
mod source;
mod sportsdb;

#[cfg(test)]
pub mod test_utils;
