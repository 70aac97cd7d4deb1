// Library crate for the footguessr game server
// This file exposes the public API for integration tests

pub mod app;
pub mod config;
pub mod event;
pub mod geo;
pub mod hints;
pub mod player;
pub mod round;
pub mod session;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use event::EventBus;
pub use geo::{CoordinateLookup, StaticCountryTable};
pub use hints::{HintKind, HintValue};
pub use player::{PlayerSource, RandomPlayerPicker, SportsDbClient};
pub use round::{RoundController, RoundEvent, RoundPhase};
pub use session::GameService;
pub use shared::{AppError, AppState};
