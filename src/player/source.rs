use async_trait::async_trait;

use super::models::{FormerClub, SportsDbPlayer};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerSourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PlayerSourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlayerSourceError::Parse(err.to_string())
        } else {
            PlayerSourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PlayerSourceError {
    fn from(err: serde_json::Error) -> Self {
        PlayerSourceError::Parse(err.to_string())
    }
}

/// Remote catalogue of players. `Ok(None)` means the id is unknown.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn fetch_by_id(&self, id: u64) -> Result<Option<SportsDbPlayer>, PlayerSourceError>;

    async fn fetch_former_clubs(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<FormerClub>>, PlayerSourceError>;
}
