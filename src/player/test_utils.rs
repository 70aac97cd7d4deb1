use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::models::{FormerClub, Player, SportsDbPlayer};
use super::source::{PlayerSource, PlayerSourceError};

/// A fully populated player for tests
pub fn sample_player(nationality: &str) -> Player {
    Player {
        id: "34146370".to_string(),
        display_name: "Lionel Messi".to_string(),
        last_name: Some("Messi".to_string()),
        nationality: nationality.to_string(),
        team: Some("Inter Miami".to_string()),
        position: Some("Right Winger".to_string()),
        portrait_image_url: "https://example.com/messi.png".to_string(),
        birth_location: Some("Rosario, Argentina".to_string()),
        jersey_number: Some("10".to_string()),
        height: Some("1.70 m".to_string()),
        weight: Some("72 kg".to_string()),
        preferred_side: Some("Left".to_string()),
        birth_date: Some("1987-06-24".to_string()),
    }
}

/// Raw listing of a soccer player with an image
pub fn soccer_listing(id: &str, name: &str, nationality: &str) -> SportsDbPlayer {
    SportsDbPlayer {
        id_player: Some(id.to_string()),
        str_player: Some(name.to_string()),
        str_nationality: Some(nationality.to_string()),
        str_sport: Some("Soccer".to_string()),
        str_cutout: Some(format!("https://example.com/{}.png", id)),
        ..Default::default()
    }
}

/// Player source that answers lookups from a queue, in call order
#[derive(Default)]
pub struct ScriptedPlayerSource {
    responses: Mutex<VecDeque<Result<Option<SportsDbPlayer>, PlayerSourceError>>>,
    former_clubs: Mutex<HashMap<String, Vec<FormerClub>>>,
    calls: Mutex<Vec<u64>>,
}

impl ScriptedPlayerSource {
    pub fn new(responses: Vec<Result<Option<SportsDbPlayer>, PlayerSourceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn with_former_clubs(self, player_id: &str, clubs: Vec<FormerClub>) -> Self {
        self.former_clubs
            .lock()
            .unwrap()
            .insert(player_id.to_string(), clubs);
        self
    }

    pub fn requested_ids(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerSource for ScriptedPlayerSource {
    async fn fetch_by_id(&self, id: u64) -> Result<Option<SportsDbPlayer>, PlayerSourceError> {
        self.calls.lock().unwrap().push(id);
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn fetch_former_clubs(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<FormerClub>>, PlayerSourceError> {
        Ok(self.former_clubs.lock().unwrap().get(player_id).cloned())
    }
}
