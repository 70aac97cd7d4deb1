// Public API - what other modules can use
pub use handler::round_events;
pub use socket::{forward_events, EventSocket, SocketError};

// Internal modules
mod handler;
mod socket;
