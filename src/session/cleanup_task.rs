use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, instrument};

use super::service::GameService;

/// Configuration for the cleanup task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run the cleanup task
    pub cleanup_interval: Duration,
    /// How long a session must be idle before it is dropped
    pub inactivity_threshold: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(10 * 60), // 10 minutes
            inactivity_threshold: Duration::from_secs(2 * 60 * 60), // 2 hours
        }
    }
}

/// Starts the background task that periodically removes idle sessions
#[instrument(skip(game_service))]
pub async fn start_cleanup_task(game_service: Arc<GameService>, config: CleanupConfig) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        inactivity_threshold_secs = config.inactivity_threshold.as_secs(),
        "Starting session cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;
        cleanup_idle_sessions(&game_service, config.inactivity_threshold).await;
    }
}

async fn cleanup_idle_sessions(game_service: &GameService, inactivity_threshold: Duration) -> usize {
    let removed = game_service.remove_idle_sessions(inactivity_threshold).await;

    if removed == 0 {
        debug!("No idle sessions to clean up");
    } else {
        let remaining = game_service.session_count().await;
        info!(removed, remaining, "Session cleanup completed");
    }

    removed
}
