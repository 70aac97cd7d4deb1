use std::net::SocketAddr;
use std::sync::Arc;

use footguessr::{
    app, player::FormerClub, AppState, EventBus, GameService, RandomPlayerPicker,
    StaticCountryTable,
};

use super::mocks::{listing, MockPlayerSource};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub game_service: Arc<GameService>,
    pub source: MockPlayerSource,
}

pub struct TestSetupBuilder {
    nationalities: Vec<String>,
    former_clubs: Vec<FormerClub>,
    hold_former_clubs: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            nationalities: vec![],
            former_clubs: vec![],
            hold_former_clubs: false,
        }
    }

    /// One queued player per nationality, served round after round.
    /// Player ids are "1", "2", ... in queue order.
    pub fn with_players(mut self, nationalities: Vec<&str>) -> Self {
        self.nationalities = nationalities.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// Former clubs of the first queued player
    pub fn with_former_clubs(mut self, clubs: Vec<(&str, Option<&str>)>) -> Self {
        self.former_clubs = clubs
            .into_iter()
            .map(|(name, badge)| FormerClub {
                club_name: name.to_string(),
                badge_image_url: badge.map(str::to_string),
            })
            .collect();
        self
    }

    pub fn holding_former_clubs(mut self) -> Self {
        self.hold_former_clubs = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let mut source = MockPlayerSource::new();
        if self.hold_former_clubs {
            source = source.hold_former_clubs();
        }

        for (i, nationality) in self.nationalities.iter().enumerate() {
            let id = (i + 1).to_string();
            source
                .queue_player(listing(&id, &format!("Player {}", id), nationality))
                .await;
        }
        source.set_former_clubs("1", self.former_clubs).await;

        let game_service = Arc::new(GameService::new(
            Arc::new(source.clone()),
            Arc::new(StaticCountryTable::bundled().unwrap()),
            RandomPlayerPicker::new(3),
            EventBus::new(),
        ));

        TestSetup {
            game_service,
            source,
        }
    }
}

impl TestSetup {
    pub async fn start_session(&self) -> String {
        let (session_id, _) = self.game_service.create_session().await.unwrap();
        session_id
    }

    /// Serves the full router on a random local port
    #[allow(dead_code)]
    pub async fn spawn_server(&self) -> SocketAddr {
        let state = AppState::new(
            self.game_service.clone(),
            Arc::new(StaticCountryTable::bundled().unwrap()),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app::router(state)).await.unwrap();
        });

        addr
    }
}
