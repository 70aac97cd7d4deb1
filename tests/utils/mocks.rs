use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use footguessr::player::{FormerClub, PlayerSource, PlayerSourceError, SportsDbPlayer};

// ============================================================================
// Mock Infrastructure
// ============================================================================

pub fn listing(id: &str, name: &str, nationality: &str) -> SportsDbPlayer {
    SportsDbPlayer {
        id_player: Some(id.to_string()),
        str_player: Some(name.to_string()),
        str_nationality: Some(nationality.to_string()),
        str_position: Some("Forward".to_string()),
        str_team: Some("Test FC".to_string()),
        str_sport: Some("Soccer".to_string()),
        str_cutout: Some(format!("https://img.example.com/{}.png", id)),
        ..Default::default()
    }
}

/// Serves queued players in order. Former club lookups can be held until released.
#[derive(Clone, Default)]
pub struct MockPlayerSource {
    players: Arc<RwLock<VecDeque<SportsDbPlayer>>>,
    former_clubs: Arc<RwLock<HashMap<String, Vec<FormerClub>>>>,
    gate: Option<Arc<Notify>>,
}

impl MockPlayerSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn queue_player(&self, player: SportsDbPlayer) {
        self.players.write().await.push_back(player);
    }

    pub async fn set_former_clubs(&self, player_id: &str, clubs: Vec<FormerClub>) {
        self.former_clubs
            .write()
            .await
            .insert(player_id.to_string(), clubs);
    }

    /// Makes former club lookups wait until `release_former_clubs` is called
    pub fn hold_former_clubs(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release_former_clubs(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl PlayerSource for MockPlayerSource {
    async fn fetch_by_id(&self, _id: u64) -> Result<Option<SportsDbPlayer>, PlayerSourceError> {
        Ok(self.players.write().await.pop_front())
    }

    async fn fetch_former_clubs(
        &self,
        player_id: &str,
    ) -> Result<Option<Vec<FormerClub>>, PlayerSourceError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.former_clubs.read().await.get(player_id).cloned())
    }
}
