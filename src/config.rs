use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::player::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES};
use crate::session::CleanupConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 120;
pub const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 10;
/// One year
pub const MAX_MINUTES: u64 = 365 * 24 * 60;

/// Server configuration loaded from environment variables.
/// Every value has a default, so an empty environment is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub sportsdb_base_url: String,
    pub player_fetch_retries: u32,
    pub session_idle_minutes: u64,
    pub cleanup_interval_minutes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            sportsdb_base_url: DEFAULT_BASE_URL.to_string(),
            player_fetch_retries: DEFAULT_MAX_RETRIES,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            cleanup_interval_minutes: DEFAULT_CLEANUP_INTERVAL_MINUTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|key| std::env::var(key).ok());
        config.log_values();
        config
    }

    /// Builds the config from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: text_var(&lookup, "BIND_ADDR").unwrap_or(defaults.bind_addr),
            sportsdb_base_url: text_var(&lookup, "SPORTSDB_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.sportsdb_base_url),
            player_fetch_retries: number_var(
                &lookup,
                "PLAYER_FETCH_RETRIES",
                defaults.player_fetch_retries,
            ),
            session_idle_minutes: minutes_var(
                &lookup,
                "SESSION_IDLE_MINUTES",
                defaults.session_idle_minutes,
            ),
            cleanup_interval_minutes: minutes_var(
                &lookup,
                "CLEANUP_INTERVAL_MINUTES",
                defaults.cleanup_interval_minutes,
            ),
        }
    }

    pub fn cleanup(&self) -> CleanupConfig {
        CleanupConfig {
            cleanup_interval: minutes(self.cleanup_interval_minutes),
            inactivity_threshold: minutes(self.session_idle_minutes),
        }
    }

    fn log_values(&self) {
        info!(
            bind_addr = %self.bind_addr,
            sportsdb_base_url = %self.sportsdb_base_url,
            player_fetch_retries = self.player_fetch_retries,
            session_idle_minutes = self.session_idle_minutes,
            cleanup_interval_minutes = self.cleanup_interval_minutes,
            "Config loaded"
        );
    }
}

fn text_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Positive number, or `default` with a warning
fn number_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    let Some(raw) = text_var(lookup, key) else {
        return default;
    };

    match raw.parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => {
            warn!(key, value = %raw, default = %default, "Invalid config value, using default");
            default
        }
    }
}

/// Like `number_var`, capped at `MAX_MINUTES`
fn minutes_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    let value = number_var(lookup, key, default);
    if value > MAX_MINUTES {
        warn!(key, value, max = MAX_MINUTES, "Config value too large, capping");
        return MAX_MINUTES;
    }
    value
}

fn minutes(value: u64) -> Duration {
    Duration::from_secs(value.min(MAX_MINUTES).saturating_mul(60))
}
