use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::models::{
    FormerClub, FormerTeamsResponse, PlayerLookupResponse, SportsDbFormerTeam, SportsDbPlayer,
};
use super::source::{PlayerSource, PlayerSourceError};

/// Free tier endpoint of TheSportsDB v1 API
pub const DEFAULT_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/123";

/// HTTP client for TheSportsDB
pub struct SportsDbClient {
    client: reqwest::Client,
    base_url: String,
}

impl SportsDbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str, id: &str) -> String {
        format!("{}/{}?id={}", self.base_url, path, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PlayerSourceError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlayerSourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for SportsDbClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl PlayerSource for SportsDbClient {
    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: u64) -> Result<Option<SportsDbPlayer>, PlayerSourceError> {
        let url = self.endpoint("lookupplayer.php", &id.to_string());
        let response: PlayerLookupResponse = self.get_json(&url).await?;

        let player = response.players.and_then(|players| players.into_iter().next());
        debug!(player_id = id, found = player.is_some(), "Player lookup finished");
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn fetch_former_clubs(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<FormerClub>>, PlayerSourceError> {
        let url = self.endpoint("lookupformerteams.php", player_id);
        let response: FormerTeamsResponse = self.get_json(&url).await?;

        let clubs = response
            .formerteams
            .map(|teams| {
                teams
                    .into_iter()
                    .filter_map(SportsDbFormerTeam::into_club)
                    .collect::<Vec<_>>()
            })
            .filter(|clubs| !clubs.is_empty());

        debug!(
            player_id = %player_id,
            club_count = clubs.as_ref().map_or(0, Vec::len),
            "Former clubs lookup finished"
        );
        Ok(clubs)
    }
}
