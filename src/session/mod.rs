// Public API - what other modules can use
pub use cleanup_task::{start_cleanup_task, CleanupConfig};
pub use handlers::{
    create_session, get_session, list_countries, list_hints, purchase_hint, start_round,
    submit_guess,
};
pub use service::GameService;
pub use types::{GuessRequest, SessionResponse};

// Internal modules
mod cleanup_task;
mod handlers;
pub mod models;
pub mod repository;
mod service;
mod types;
