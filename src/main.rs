use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use footguessr::{
    app, session::start_cleanup_task, AppConfig, AppState, EventBus, GameService,
    RandomPlayerPicker, SportsDbClient, StaticCountryTable,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footguessr=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting footguessr server");

    let config = AppConfig::from_env();

    let countries = Arc::new(StaticCountryTable::bundled()?);
    info!(countries = countries.len(), "Country table loaded");

    let game_service = Arc::new(GameService::new(
        Arc::new(SportsDbClient::new(config.sportsdb_base_url.clone())),
        countries.clone(),
        RandomPlayerPicker::new(config.player_fetch_retries),
        EventBus::new(),
    ));

    tokio::spawn(start_cleanup_task(game_service.clone(), config.cleanup()));

    let app_state = AppState::new(game_service, countries);
    let app = app::router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
